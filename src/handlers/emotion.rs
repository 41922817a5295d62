use crate::core::error::AppError;
use crate::core::state::AppState;
use crate::handlers::session::AuthSession;
use crate::models::api::{RecommendRequest, RecommendationResponse};
use crate::models::session::Session;
use crate::recommend::{mapper::recommend_query, search::search_url};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Capture one webcam frame, classify it and open a matching search
///
/// POST /emotion/capture
///
/// # Flow
/// 1. Grab a single frame (device released before returning)
/// 2. Ask the classifier for the dominant emotion
/// 3. Map emotion + preferences to a search query
/// 4. Build the search URL and hand it to the browser launcher
///
/// Capture and classification failures are returned to the caller as-is,
/// never retried.
#[instrument(skip_all)]
pub async fn capture_handler(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
) -> Result<Response, AppError> {
    let frame = state.frame_source.capture().await.map_err(|e| {
        warn!(error = %e, "Webcam capture failed");
        e
    })?;

    let emotion = state.classifier.classify(&frame).await.map_err(|e| {
        warn!(error = %e, "Emotion analysis failed");
        e
    })?;

    info!(emotion = %emotion, "Detected emotion");

    let recommendation = recommend(&state, &session, emotion, true);

    Ok((StatusCode::OK, Json(recommendation)).into_response())
}

/// Map an emotion the client already knows to a search
///
/// POST /recommend {emotion}
pub async fn recommend_handler(
    State(state): State<Arc<AppState>>,
    AuthSession(session): AuthSession,
    Json(request): Json<RecommendRequest>,
) -> Result<Response, AppError> {
    let recommendation = recommend(&state, &session, request.emotion, false);

    Ok((StatusCode::OK, Json(recommendation)).into_response())
}

fn recommend(
    state: &AppState,
    session: &Session,
    emotion: String,
    launch: bool,
) -> RecommendationResponse {
    let query = recommend_query(
        &emotion,
        &session.preferences.language,
        &session.preferences.singer,
    );
    let url = search_url(&state.config.recommend.search_base_url, &query);

    let opened = launch
        && state.launcher.is_enabled()
        && match state.launcher.open(&url) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to open browser");
                false
            }
        };

    info!(
        username = %session.username,
        query = %query,
        opened = opened,
        "Recommendation ready"
    );

    RecommendationResponse {
        emotion,
        query,
        url,
        opened,
    }
}
