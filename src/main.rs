use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speechtube_backend::controllers::{speech::SpeechController, video_search::VideoSearchController};
use speechtube_backend::domain::speech::{SpeechService, VoiceDefaults};
use speechtube_backend::domain::video_search::VideoSearchService;
use speechtube_backend::infrastructure::config::{Config, LogFormat};
use speechtube_backend::infrastructure::http::{build_router, start_http_server};
use speechtube_backend::infrastructure::oauth::GoogleServiceAccountClient;
use speechtube_backend::infrastructure::repositories::{
    GoogleSpeechRepository, YouTubeVideoRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| anyhow!("invalid configuration: {e}"))?;

    init_logging(&config);

    tracing::info!(
        "Starting SpeechTube Backend on {}:{}",
        config.host,
        config.port
    );

    if !config.speech_configured() {
        tracing::warn!("GCP_TTS_CREDENTIALS_JSON not set; /synthesize and /voices will fail");
    }
    if !config.youtube_configured() {
        tracing::warn!("YT_API_KEY not set; /video-search will fail");
    }

    let config = Arc::new(config);

    // One client for every vendor call, so every call shares the timeout
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let google_auth = config.tts_credentials.clone().map(|key| {
        let client = GoogleServiceAccountClient::new(key, http_client.clone());
        tracing::info!(client_email = %client.client_email(), "Using Google service account");
        client
    });

    tracing::info!("Instantiating repositories...");
    let speech_repo = Arc::new(GoogleSpeechRepository::new(
        http_client.clone(),
        config.tts_api_base_url.clone(),
        google_auth,
    ));
    let video_repo = Arc::new(YouTubeVideoRepository::new(
        http_client,
        config.youtube_api_base_url.clone(),
        config.youtube_api_key.clone(),
    ));

    tracing::info!("Instantiating services...");
    let speech_service = Arc::new(SpeechService::new(
        speech_repo,
        VoiceDefaults {
            voice_name: config.tts_voice.clone(),
            language_code: config.tts_language.clone(),
        },
    ));
    let video_search_service = Arc::new(VideoSearchService::new(video_repo));

    tracing::info!("Instantiating controllers...");
    let speech_controller = Arc::new(SpeechController::new(speech_service));
    let video_search_controller = Arc::new(VideoSearchController::new(video_search_service));

    let app = build_router(config.clone(), speech_controller, video_search_controller);

    start_http_server(config, app).await
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speechtube_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
