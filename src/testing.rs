// Fakes and helpers shared by the unit tests

use crate::capture::classifier::EmotionClassifier;
use crate::capture::frame_source::{Frame, FrameSource};
use crate::capture::launcher::{BrowserLauncher, DisabledLauncher};
use crate::core::config::Config;
use crate::core::error::{CaptureError, ClassifyError, LaunchError};
use crate::core::state::AppState;
use async_trait::async_trait;
use axum::{body::Body, response::Response};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub struct FakeFrameSource {
    fail: Option<fn() -> CaptureError>,
}

impl FakeFrameSource {
    pub fn ok() -> Self {
        Self { fail: None }
    }

    pub fn failing(make_error: fn() -> CaptureError) -> Self {
        Self {
            fail: Some(make_error),
        }
    }
}

#[async_trait]
impl FrameSource for FakeFrameSource {
    async fn capture(&self) -> Result<Frame, CaptureError> {
        match self.fail {
            Some(make_error) => Err(make_error()),
            None => Ok(Frame::jpeg(vec![0xff, 0xd8, 0xff, 0xd9])),
        }
    }
}

pub struct FakeClassifier {
    outcome: Result<String, fn() -> ClassifyError>,
    calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn returning(emotion: &str) -> Self {
        Self {
            outcome: Ok(emotion.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(make_error: fn() -> ClassifyError) -> Self {
        Self {
            outcome: Err(make_error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EmotionClassifier for FakeClassifier {
    async fn classify(&self, _frame: &Frame) -> Result<String, ClassifyError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.outcome {
            Ok(emotion) => Ok(emotion.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Records every URL it is asked to open
#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl BrowserLauncher for RecordingLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        if self.fail {
            return Err(LaunchError::Spawn {
                program: "fake-browser".to_string(),
                reason: "not installed".to_string(),
            });
        }

        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.user_data_file = temp_dir.path().join("user_data.txt");
    config
}

pub fn create_test_state(temp_dir: &TempDir) -> Arc<AppState> {
    create_test_state_with(
        temp_dir,
        Arc::new(FakeFrameSource::ok()),
        Arc::new(FakeClassifier::returning("happy")),
        Arc::new(DisabledLauncher),
    )
}

pub fn create_test_state_with(
    temp_dir: &TempDir,
    frame_source: Arc<dyn FrameSource>,
    classifier: Arc<dyn EmotionClassifier>,
    launcher: Arc<dyn BrowserLauncher>,
) -> Arc<AppState> {
    Arc::new(AppState::with_collaborators(
        test_config(temp_dir),
        frame_source,
        classifier,
        launcher,
    ))
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let (_, body) = response.into_parts();
    let bytes = Body::new(body).collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
