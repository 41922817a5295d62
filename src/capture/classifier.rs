use crate::capture::frame_source::Frame;
use crate::core::config::ClassifierConfig;
use crate::core::error::ClassifyError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Reports the dominant emotion in a still image
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, frame: &Frame) -> Result<String, ClassifyError>;
}

/// Client for a DeepFace-compatible `/analyze` HTTP endpoint
pub struct DeepFaceClient {
    client: reqwest::Client,
    analyze_url: String,
    detector_backend: String,
    enforce_detection: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    img: String,
    actions: [&'a str; 1],
    detector_backend: &'a str,
    enforce_detection: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    results: Vec<FaceAnalysis>,
}

#[derive(Debug, Deserialize)]
struct FaceAnalysis {
    dominant_emotion: String,
}

impl DeepFaceClient {
    pub fn new(
        endpoint: &str,
        detector_backend: String,
        enforce_detection: bool,
        timeout: Duration,
    ) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            analyze_url: format!("{}/analyze", endpoint.trim_end_matches('/')),
            detector_backend,
            enforce_detection,
        })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        Self::new(
            &config.endpoint,
            config.detector_backend.clone(),
            config.enforce_detection,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

fn data_uri(frame: &Frame) -> String {
    format!("data:{};base64,{}", frame.mime_type, STANDARD.encode(&frame.bytes))
}

/// Pull the first face's dominant emotion out of an analysis response body
fn dominant_emotion(body: &[u8]) -> Result<String, ClassifyError> {
    let response: AnalyzeResponse =
        serde_json::from_slice(body).map_err(|e| ClassifyError::Decode(e.to_string()))?;

    response
        .results
        .into_iter()
        .next()
        .map(|face| face.dominant_emotion)
        .ok_or(ClassifyError::NoResult)
}

#[async_trait]
impl EmotionClassifier for DeepFaceClient {
    async fn classify(&self, frame: &Frame) -> Result<String, ClassifyError> {
        let request = AnalyzeRequest {
            img: data_uri(frame),
            actions: ["emotion"],
            detector_backend: &self.detector_backend,
            enforce_detection: self.enforce_detection,
        };

        let response = self
            .client
            .post(&self.analyze_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.analyze_url, error = %e, "Emotion analyzer unreachable");
                ClassifyError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).chars().take(512).collect();
            warn!(status = status.as_u16(), "Emotion analyzer returned an error");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let emotion = dominant_emotion(&body)?;
        debug!(emotion = %emotion, "Emotion analyzed");

        Ok(emotion)
    }
}
