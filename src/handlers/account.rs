use crate::core::error::{AppError, StoreError};
use crate::core::state::AppState;
use crate::handlers::session::AuthSession;
use crate::models::api::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, SuccessResponse,
};
use crate::stores::credential_store::find_authenticated;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Create a new account
///
/// POST /register {username, password, language, singer}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let record = request.validate().map_err(|e| {
        warn!(error = %e, "Rejected registration form");
        e
    })?;

    match state.credentials.register(&record) {
        Ok(()) => {}
        Err(StoreError::DuplicateUsername(username)) => {
            warn!(username = %username, "Registration with existing username");
            return Err(StoreError::DuplicateUsername(username).into());
        }
        Err(e) => {
            error!(error = %e, "Failed to register user");
            return Err(e.into());
        }
    }

    info!(
        username = %record.username,
        language = %record.language,
        singer = %record.singer,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            message: "Registration successful! Please login.".to_string(),
        }),
    )
        .into_response())
}

/// Check credentials and start a session
///
/// POST /login {username, password}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let users = state.credentials.load().map_err(|e| {
        error!(error = %e, "Failed to load user data");
        e
    })?;

    let Some(user) = find_authenticated(&users, &request.username, &request.password) else {
        warn!(username = %request.username, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    };

    let session = state.sessions.create(user);

    info!(
        username = %session.username,
        active_sessions = state.sessions.len(),
        "Login successful"
    );

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            token: session.token,
            username: session.username,
            language: session.preferences.language,
            singer: session.preferences.singer,
        }),
    )
        .into_response())
}

/// End the caller's session
///
/// POST /logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
) -> Result<Response, AppError> {
    state.sessions.remove(&session.token);

    info!(username = %session.username, "Logged out");

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}

/// Stored preferences of the logged-in user
///
/// GET /me
pub async fn profile_handler(AuthSession(session): AuthSession) -> Result<Response, AppError> {
    Ok((
        StatusCode::OK,
        Json(ProfileResponse {
            username: session.username,
            language: session.preferences.language,
            singer: session.preferences.singer,
        }),
    )
        .into_response())
}
