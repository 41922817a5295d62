use crate::core::error::AppError;
use crate::core::state::AppState;
use crate::models::session::Session;
use crate::utils::auth::bearer_token;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use tracing::debug;

/// The caller's session, resolved from `Authorization: Bearer <token>`
pub struct AuthSession(pub Session);

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("Request without bearer token");
            AppError::Unauthorized
        })?;

        state
            .sessions
            .get(token)
            .map(AuthSession)
            .ok_or_else(|| {
                debug!("Unknown or expired session token");
                AppError::Unauthorized
            })
    }
}
