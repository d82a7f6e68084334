use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::config::Config;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reports which vendors have credentials. The process serves requests
/// either way, so this is always 200.
pub async fn health_ready(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let status = |configured: bool| if configured { "configured" } else { "missing" };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "speech": status(config.speech_configured()),
            "youtube": status(config.youtube_configured())
        })),
    )
}
