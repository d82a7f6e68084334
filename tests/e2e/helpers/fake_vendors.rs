use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const FAKE_ACCESS_TOKEN: &str = "fake-google-access-token";

/// Minimal MP3 frame header, enough for byte comparisons
pub fn mock_audio_bytes() -> Vec<u8> {
    vec![0xFF, 0xFB, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Serve `router` on an ephemeral port and return its base url
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake vendor listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn vendor_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"code": status.as_u16(), "message": message}})),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Google Cloud Text-to-Speech + OAuth token endpoint
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeGoogleState {
    pub token_requests: Vec<HashMap<String, String>>,
    pub synthesize_bodies: Vec<Value>,
    pub voices_calls: usize,
    pub authorization_headers: Vec<String>,
    pub audio: Vec<u8>,
    pub voices: Vec<Value>,
    pub failure: Option<(StatusCode, String)>,
}

#[derive(Clone)]
pub struct FakeGoogle {
    pub base_url: String,
    pub state: Arc<Mutex<FakeGoogleState>>,
}

impl FakeGoogle {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeGoogleState {
            audio: mock_audio_bytes(),
            voices: default_voices(),
            ..Default::default()
        }));

        let router = Router::new()
            .route("/token", post(token))
            .route("/v1/*action", any(text_to_speech))
            .with_state(state.clone());

        Self {
            base_url: spawn(router).await,
            state,
        }
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.base_url)
    }

    pub fn api_base_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn vendor_calls(&self) -> usize {
        let state = self.state.lock();
        state.synthesize_bodies.len() + state.voices_calls
    }

    pub fn last_synthesize_body(&self) -> Value {
        self.state
            .lock()
            .synthesize_bodies
            .last()
            .cloned()
            .expect("text:synthesize was never called")
    }

    pub fn fail_with(&self, status: StatusCode, message: &str) {
        self.state.lock().failure = Some((status, message.to_string()));
    }

    pub fn return_audio(&self, audio: Vec<u8>) {
        self.state.lock().audio = audio;
    }
}

fn default_voices() -> Vec<Value> {
    vec![
        json!({"name": "ko-KR-Wavenet-B", "languageCodes": ["ko-KR"], "ssmlGender": "FEMALE", "naturalSampleRateHertz": 24000}),
        json!({"name": "en-US-Neural2-J", "languageCodes": ["en-US"], "ssmlGender": "MALE", "naturalSampleRateHertz": 24000}),
        json!({"name": "ko-KR-Standard-A", "languageCodes": ["ko-KR"], "ssmlGender": "FEMALE", "naturalSampleRateHertz": 24000}),
        json!({"languageCodes": ["xx-XX"]}),
    ]
}

async fn token(
    State(state): State<Arc<Mutex<FakeGoogleState>>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let accepted = form.get("grant_type").map(String::as_str)
        == Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
        && form.get("assertion").is_some_and(|a| a.split('.').count() == 3);
    state.lock().token_requests.push(form);

    if !accepted {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response();
    }

    Json(json!({
        "access_token": FAKE_ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
    .into_response()
}

async fn text_to_speech(
    State(state): State<Arc<Mutex<FakeGoogleState>>>,
    Path(action): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock();

    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.authorization_headers.push(authorization.clone());
    if authorization != format!("Bearer {}", FAKE_ACCESS_TOKEN) {
        return vendor_error(StatusCode::UNAUTHORIZED, "Request had invalid authentication credentials.");
    }

    match (method, action.as_str()) {
        (Method::POST, "text:synthesize") => {
            let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            state.synthesize_bodies.push(body);
            if let Some((status, message)) = &state.failure {
                return vendor_error(*status, message);
            }
            Json(json!({"audioContent": STANDARD.encode(&state.audio)})).into_response()
        }
        (Method::GET, "voices") => {
            state.voices_calls += 1;
            if let Some((status, message)) = &state.failure {
                return vendor_error(*status, message);
            }
            Json(json!({"voices": state.voices})).into_response()
        }
        _ => vendor_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

// ---------------------------------------------------------------------------
// YouTube Data API v3
// ---------------------------------------------------------------------------

/// One video as the fake catalog knows it
#[derive(Clone)]
pub struct FakeVideo {
    pub id: &'static str,
    pub title: &'static str,
    pub channel_id: &'static str,
    pub published_at: &'static str,
    pub duration: &'static str,
    pub view_count: u64,
}

impl FakeVideo {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "snippet": {
                "title": self.title,
                "channelTitle": format!("Channel {}", self.channel_id),
                "channelId": self.channel_id,
                "publishedAt": self.published_at,
                "thumbnails": {
                    "default": {"url": format!("https://i.ytimg.com/vi/{}/default.jpg", self.id)},
                    "medium": {"url": format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", self.id)}
                }
            },
            "contentDetails": {"duration": self.duration},
            "statistics": {"viewCount": self.view_count.to_string()}
        })
    }
}

#[derive(Default)]
pub struct FakeYouTubeState {
    /// (api, query params) per call, in order
    pub calls: Vec<(String, HashMap<String, String>)>,
    pub videos: Vec<FakeVideo>,
    pub subscribers: HashMap<String, u64>,
    pub search_failure: Option<(StatusCode, String)>,
    pub channels_failure: Option<(StatusCode, String)>,
}

#[derive(Clone)]
pub struct FakeYouTube {
    pub base_url: String,
    pub state: Arc<Mutex<FakeYouTubeState>>,
}

type YouTubeState = State<Arc<Mutex<FakeYouTubeState>>>;
type Params = Query<HashMap<String, String>>;

impl FakeYouTube {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeYouTubeState::default()));

        let router = Router::new()
            .route("/youtube/v3/search", get(search))
            .route("/youtube/v3/videos", get(videos))
            .route("/youtube/v3/channels", get(channels))
            .with_state(state.clone());

        Self {
            base_url: spawn(router).await,
            state,
        }
    }

    pub fn api_base_url(&self) -> String {
        format!("{}/youtube/v3", self.base_url)
    }

    pub fn seed(&self, videos: Vec<FakeVideo>, subscribers: &[(&str, u64)]) {
        let mut state = self.state.lock();
        state.videos = videos;
        state.subscribers = subscribers
            .iter()
            .map(|(id, count)| (id.to_string(), *count))
            .collect();
    }

    pub fn calls_to(&self, api: &str) -> Vec<HashMap<String, String>> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(name, _)| name == api)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn fail_search_with(&self, status: StatusCode, message: &str) {
        self.state.lock().search_failure = Some((status, message.to_string()));
    }

    pub fn fail_channels_with(&self, status: StatusCode, message: &str) {
        self.state.lock().channels_failure = Some((status, message.to_string()));
    }
}

fn ids_param(params: &HashMap<String, String>) -> Vec<String> {
    params
        .get("id")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

async fn search(State(state): YouTubeState, Query(params): Params) -> Response {
    let mut state = state.lock();
    state.calls.push(("search".to_string(), params.clone()));
    if let Some((status, message)) = &state.search_failure {
        return vendor_error(*status, message);
    }

    let limit = params
        .get("maxResults")
        .and_then(|m| m.parse::<usize>().ok())
        .unwrap_or(5);
    let items: Vec<Value> = state
        .videos
        .iter()
        .take(limit)
        .map(|v| json!({"id": {"kind": "youtube#video", "videoId": v.id}}))
        .collect();

    Json(json!({"kind": "youtube#searchListResponse", "items": items})).into_response()
}

async fn videos(State(state): YouTubeState, Query(params): Params) -> Response {
    let mut state = state.lock();
    state.calls.push(("videos".to_string(), params.clone()));

    let wanted = ids_param(&params);
    let items: Vec<Value> = state
        .videos
        .iter()
        .filter(|v| wanted.iter().any(|id| id == v.id))
        .map(FakeVideo::to_json)
        .collect();

    Json(json!({"kind": "youtube#videoListResponse", "items": items})).into_response()
}

async fn channels(State(state): YouTubeState, Query(params): Params) -> Response {
    let mut state = state.lock();
    state.calls.push(("channels".to_string(), params.clone()));
    if let Some((status, message)) = &state.channels_failure {
        return vendor_error(*status, message);
    }

    let items: Vec<Value> = ids_param(&params)
        .into_iter()
        .filter_map(|id| {
            state.subscribers.get(&id).map(|count| {
                json!({"id": id, "statistics": {"subscriberCount": count.to_string()}})
            })
        })
        .collect();

    Json(json!({"kind": "youtube#channelListResponse", "items": items})).into_response()
}
