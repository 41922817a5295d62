use axum::{
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Response},
};
use crate::core::error::AppError;

pub async fn fallback_handler(uri: Uri, headers: HeaderMap) -> Response {
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let is_browser = ["Mozilla", "Chrome", "Safari", "Firefox", "Edge"]
        .iter()
        .any(|marker| user_agent.contains(marker));

    if is_browser {
        let html = "<h1>Emotion-Based Music Recommender</h1>\
            <p>This is a JSON API. POST /register, POST /login, then POST /emotion/capture.</p>";

        return Html(html).into_response();
    }

    AppError::NotFound(format!(
        "{}. Valid endpoints: /health, /register, /login, /logout, /me, /emotion/capture, /recommend",
        uri.path()
    ))
    .into_response()
}
