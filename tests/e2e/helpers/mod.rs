use anyhow::Result;
use axum::Router;
use serde_json::json;
use speechtube_backend::{
    controllers::{speech::SpeechController, video_search::VideoSearchController},
    domain::{
        speech::{SpeechService, VoiceDefaults},
        video_search::VideoSearchService,
    },
    infrastructure::{
        config::{Config, LogFormat},
        http::build_router,
        oauth::{GoogleServiceAccountClient, ServiceAccountKey},
        repositories::{GoogleSpeechRepository, YouTubeVideoRepository},
    },
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fake_vendors;

use api_client::TestClient;
use fake_vendors::{FakeGoogle, FakeYouTube};

const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_service_account_key.pem");

/// App wired to fake Google and YouTube servers with valid credentials
pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Arc<Config>,
    pub google: FakeGoogle,
    pub youtube: FakeYouTube,
}

/// App started with neither the service-account key nor the YouTube key
pub struct UnconfiguredTestContext {
    pub client: TestClient,
    pub google: FakeGoogle,
    pub youtube: FakeYouTube,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let google = FakeGoogle::start().await;
            let youtube = FakeYouTube::start().await;

            let credentials = ServiceAccountKey::from_json(
                &json!({
                    "type": "service_account",
                    "project_id": "speechtube-test",
                    "private_key_id": "test-key-id",
                    "private_key": TEST_PRIVATE_KEY,
                    "client_email": "speechtube@speechtube-test.iam.gserviceaccount.com",
                    "token_uri": google.token_uri()
                })
                .to_string(),
            )
            .expect("Failed to parse test service account key");

            let config = test_config(&google, &youtube, Some(credentials), Some("test-yt-key"));
            let client = start_app(config.clone())
                .await
                .expect("Failed to start app");

            Self {
                client,
                config,
                google,
                youtube,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl AsyncTestContext for UnconfiguredTestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let google = FakeGoogle::start().await;
            let youtube = FakeYouTube::start().await;

            let config = test_config(&google, &youtube, None, None);
            let client = start_app(config).await.expect("Failed to start app");

            Self {
                client,
                google,
                youtube,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

fn test_config(
    google: &FakeGoogle,
    youtube: &FakeYouTube,
    tts_credentials: Option<ServiceAccountKey>,
    youtube_api_key: Option<&str>,
) -> Arc<Config> {
    Arc::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        log_format: LogFormat::Pretty,
        tts_credentials,
        tts_language: "ko-KR".to_string(),
        tts_voice: "ko-KR-Standard-A".to_string(),
        tts_api_base_url: google.api_base_url(),
        youtube_api_key: youtube_api_key.map(str::to_string),
        youtube_api_base_url: youtube.api_base_url(),
        upstream_timeout_secs: 5,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
    })
}

/// Wire the real adapters, services and router the way `main` does
fn create_app(config: Arc<Config>) -> Result<Router> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let google_auth = config
        .tts_credentials
        .clone()
        .map(|key| GoogleServiceAccountClient::new(key, http_client.clone()));

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

    let speech_service = Arc::new(SpeechService::new(
        speech_repo,
        VoiceDefaults {
            voice_name: config.tts_voice.clone(),
            language_code: config.tts_language.clone(),
        },
    ));
    let video_search_service = Arc::new(VideoSearchService::new(video_repo));

    Ok(build_router(
        config,
        Arc::new(SpeechController::new(speech_service)),
        Arc::new(VideoSearchController::new(video_search_service)),
    ))
}

async fn start_app(config: Arc<Config>) -> Result<TestClient> {
    let app = create_app(config)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(TestClient::new(&base_url))
}
