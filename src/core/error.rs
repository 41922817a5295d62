// Centralized error handling for the recommender

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::api::ErrorResponse;

/// Errors raised by the flat-file credential store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access user data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: expected 4 comma-separated fields, got {fields}")]
    Malformed { line: usize, fields: usize },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Username already exists. Please choose another.")]
    DuplicateUsername(String),
}

/// Errors raised while grabbing a frame from the webcam
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Could not open webcam: {0}")]
    DeviceUnavailable(String),

    #[error("Could not read frame: {0}")]
    FrameRead(String),

    #[error("Webcam capture timed out after {0}s")]
    Timeout(u64),
}

/// Errors raised by the emotion classifier
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Failed to reach emotion analyzer: {0}")]
    Transport(String),

    #[error("Emotion analyzer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode emotion analyzer response: {0}")]
    Decode(String),

    #[error("Emotion analyzer found no face in the frame")]
    NoResult,
}

/// Errors raised when handing a URL to the desktop browser
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to launch browser with '{program}': {reason}")]
    Spawn { program: String, reason: String },
}

/// Errors raised by request field validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must not contain commas or line breaks")]
    ForbiddenCharacter(&'static str),

    #[error("{field} is too long: {len} > {max} characters")]
    TooLong { field: &'static str, len: usize, max: usize },
}

/// Errors returned from HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Not logged in")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Error analyzing emotion: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::InvalidField { .. }) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::DuplicateUsername(_)) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Capture(CaptureError::DeviceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Capture(_) => StatusCode::BAD_GATEWAY,
            AppError::Classify(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_username_is_conflict() {
        let err = AppError::from(StoreError::DuplicateUsername("alice".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Username already exists. Please choose another.");
    }

    #[test]
    fn test_malformed_store_is_internal() {
        let err = AppError::from(StoreError::Malformed { line: 3, fields: 2 });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_capture_statuses() {
        let unavailable = AppError::from(CaptureError::DeviceUnavailable("busy".to_string()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let read = AppError::from(CaptureError::FrameRead("empty".to_string()));
        assert_eq!(read.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_classify_message_is_user_visible() {
        let err = AppError::from(ClassifyError::NoResult);
        assert_eq!(
            err.to_string(),
            "Error analyzing emotion: Emotion analyzer found no face in the frame"
        );
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_credentials_message() {
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
