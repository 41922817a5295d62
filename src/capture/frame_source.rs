use crate::core::config::CaptureConfig;
use crate::core::error::CaptureError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// One still image as encoded by the capture program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl Frame {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/jpeg",
        }
    }
}

/// Source of single webcam frames
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the device, read one frame, release the device
    async fn capture(&self) -> Result<Frame, CaptureError>;
}

/// Captures a frame by running an external program that writes it to stdout
///
/// The child process owns the device. It is killed when dropped, so the
/// device is released on every path, including timeouts.
pub struct CommandFrameSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandFrameSource {
    pub fn new(program: String, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl FrameSource for CommandFrameSource {
    async fn capture(&self) -> Result<Frame, CaptureError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!(program = %self.program, error = %e, "Failed to start capture program");
                CaptureError::DeviceUnavailable(e.to_string())
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!(timeout_secs = self.timeout.as_secs(), "Capture program timed out");
                CaptureError::Timeout(self.timeout.as_secs())
            })?
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, stderr = %stderr, "Capture program failed");
            return Err(CaptureError::DeviceUnavailable(if stderr.is_empty() {
                format!("capture program exited with {}", output.status)
            } else {
                stderr
            }));
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::FrameRead(
                "capture program produced no image data".to_string(),
            ));
        }

        debug!(bytes = output.stdout.len(), "Frame captured");

        Ok(Frame::jpeg(output.stdout))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn source(program: &str, args: &[&str], timeout_secs: u64) -> CommandFrameSource {
        CommandFrameSource::new(
            program.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
            Duration::from_secs(timeout_secs),
        )
    }

    #[tokio::test]
    async fn test_capture_reads_stdout() {
        let frame = source("printf", &["\\377\\330jpegdata"], 5)
            .capture()
            .await
            .unwrap();

        assert_eq!(frame.mime_type, "image/jpeg");
        assert_eq!(&frame.bytes[..2], &[0xff, 0xd8]);
    }

    #[tokio::test]
    async fn test_missing_program_is_device_unavailable() {
        let result = source("/nonexistent/capture-program", &[], 5).capture().await;
        assert!(matches!(result, Err(CaptureError::DeviceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_failing_program_is_device_unavailable() {
        let result = source("sh", &["-c", "echo 'no such device' >&2; exit 1"], 5)
            .capture()
            .await;

        match result {
            Err(CaptureError::DeviceUnavailable(msg)) => assert_eq!(msg, "no such device"),
            other => panic!("Expected DeviceUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_output_is_frame_read_error() {
        let result = source("true", &[], 5).capture().await;
        assert!(matches!(result, Err(CaptureError::FrameRead(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let result = source("sleep", &["5"], 1).capture().await;
        assert!(matches!(result, Err(CaptureError::Timeout(1))));
    }
}
