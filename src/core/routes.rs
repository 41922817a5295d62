// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/register", post(crate::handlers::account::register_handler))
        .route("/login", post(crate::handlers::account::login_handler))

        // Session endpoints (require bearer token)
        .route("/logout", post(crate::handlers::account::logout_handler))
        .route("/me", get(crate::handlers::account::profile_handler))
        .route("/emotion/capture", post(crate::handlers::emotion::capture_handler))
        .route("/recommend", post(crate::handlers::emotion::recommend_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
