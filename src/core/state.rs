// Application state (AppState)

use crate::capture::classifier::{DeepFaceClient, EmotionClassifier};
use crate::capture::frame_source::{CommandFrameSource, FrameSource};
use crate::capture::launcher::{launcher_from_config, BrowserLauncher};
use crate::core::config::Config;
use crate::stores::{credential_store::CredentialStore, session_store::SessionStore};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// External collaborators sit behind trait objects so tests can swap them.
#[derive(Clone)]
pub struct AppState {
    /// Flat-file user records
    pub credentials: Arc<CredentialStore>,

    /// Logged-in sessions
    pub sessions: Arc<SessionStore>,

    /// Webcam access
    pub frame_source: Arc<dyn FrameSource>,

    /// Facial emotion recognition
    pub classifier: Arc<dyn EmotionClassifier>,

    /// Host browser, possibly disabled
    pub launcher: Arc<dyn BrowserLauncher>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state with the collaborators described by the configuration
    pub fn new(config: Config) -> Result<Self> {
        let frame_source = Arc::new(CommandFrameSource::from_config(&config.capture));
        let classifier = Arc::new(
            DeepFaceClient::from_config(&config.classifier)
                .context("Failed to create emotion analyzer client")?,
        );
        let launcher = launcher_from_config(&config.browser);

        Ok(Self::with_collaborators(config, frame_source, classifier, launcher))
    }

    pub fn with_collaborators(
        config: Config,
        frame_source: Arc<dyn FrameSource>,
        classifier: Arc<dyn EmotionClassifier>,
        launcher: Arc<dyn BrowserLauncher>,
    ) -> Self {
        let config = Arc::new(config);

        Self {
            credentials: Arc::new(CredentialStore::new(config.storage.user_data_file.clone())),
            sessions: Arc::new(SessionStore::new(config.session.ttl_secs)),
            frame_source,
            classifier,
            launcher,
            config,
        }
    }
}
