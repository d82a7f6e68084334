use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::controllers::{health, speech::SpeechController, video_search::VideoSearchController};
use crate::infrastructure::config::Config;
use crate::infrastructure::request_id::request_id_middleware;

/// Assemble every route, the static UI fallback and the shared layers
pub fn build_router(
    config: Arc<Config>,
    speech_controller: Arc<SpeechController>,
    video_search_controller: Arc<VideoSearchController>,
) -> Router {
    let speech_routes = Router::new()
        .route("/synthesize", post(SpeechController::synthesize))
        .route("/voices", get(SpeechController::list_voices))
        .with_state(speech_controller);

    let video_search_routes = Router::new()
        .route("/video-search", post(VideoSearchController::search))
        .with_state(video_search_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(config.clone());

    Router::new()
        .merge(health_routes)
        .merge(speech_routes)
        .merge(video_search_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Bind the configured address and serve until the process exits
pub async fn start_http_server(config: Arc<Config>, app: Router) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
