use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub language: String,
    pub singer: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub emotion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
    pub language: String,
    pub singer: String,
}

/// Stored preferences shown to a logged-in user
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub language: String,
    pub singer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Dominant emotion as reported by the classifier (or the client)
    pub emotion: String,
    pub query: String,
    pub url: String,
    /// Whether a browser was launched on the host
    pub opened: bool,
}
