use crate::core::config::BrowserConfig;
use crate::core::error::LaunchError;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Opens a URL in the host's default browser
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), LaunchError>;

    /// Whether `open` does anything at all
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Spawns `<program> <url>` without blocking the caller
///
/// The child is awaited on a runtime task so it never lingers as a zombie.
pub struct CommandLauncher {
    program: String,
}

impl CommandLauncher {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    /// Start the browser and return the task that reaps it
    pub fn spawn(&self, url: &str) -> Result<JoinHandle<Option<ExitStatus>>, LaunchError> {
        let spawn_error = |reason: String| LaunchError::Spawn {
            program: self.program.clone(),
            reason,
        };

        let handle = Handle::try_current().map_err(|e| spawn_error(e.to_string()))?;

        let mut child = Command::new(&self.program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(e.to_string()))?;

        let program = self.program.clone();
        Ok(handle.spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    debug!(program = %program, status = %status, "Browser launcher exited");
                    Some(status)
                }
                Err(e) => {
                    warn!(program = %program, error = %e, "Failed to wait for browser launcher");
                    None
                }
            }
        }))
    }
}

impl BrowserLauncher for CommandLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        self.spawn(url)?;

        debug!(program = %self.program, "Browser launched");
        Ok(())
    }
}

/// Used when the service runs headless; the client opens the URL itself
pub struct DisabledLauncher;

impl BrowserLauncher for DisabledLauncher {
    fn open(&self, _url: &str) -> Result<(), LaunchError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

pub fn launcher_from_config(config: &BrowserConfig) -> Arc<dyn BrowserLauncher> {
    if config.enabled {
        Arc::new(CommandLauncher::new(config.program.clone()))
    } else {
        Arc::new(DisabledLauncher)
    }
}
