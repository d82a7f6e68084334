use super::google_api::{read_json, transport_error};
use super::{RepositoryError, SpeechRepository};
use crate::domain::speech::{SynthesisRequest, VoiceDescriptor};
use crate::infrastructure::oauth::GoogleServiceAccountClient;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

const SYNTHESIZE_API: &str = "text:synthesize";
const VOICES_API: &str = "voices";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SynthesizeSpeechResponse {
    audio_content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListVoicesResponse {
    voices: Vec<GoogleVoice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GoogleVoice {
    name: String,
    language_codes: Vec<String>,
    ssml_gender: String,
    natural_sample_rate_hertz: u32,
}

impl From<GoogleVoice> for VoiceDescriptor {
    fn from(voice: GoogleVoice) -> Self {
        Self {
            name: voice.name,
            supported_language_codes: voice.language_codes,
            gender: voice.ssml_gender,
            native_sample_rate_hz: voice.natural_sample_rate_hertz,
        }
    }
}

/// Google Cloud Text-to-Speech (REST v1) implementation of the speech repository
pub struct GoogleSpeechRepository {
    http_client: reqwest::Client,
    base_url: String,
    auth: Option<GoogleServiceAccountClient>,
}

impl GoogleSpeechRepository {
    /// `auth` is `None` when no service-account key was configured; every call then
    /// fails with a configuration error.
    pub fn new(
        http_client: reqwest::Client,
        base_url: String,
        auth: Option<GoogleServiceAccountClient>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    async fn bearer_token(&self) -> Result<String, RepositoryError> {
        let auth = self.auth.as_ref().ok_or_else(|| {
            RepositoryError::NotConfigured("Missing GCP_TTS_CREDENTIALS_JSON".to_string())
        })?;
        auth.access_token().await
    }

    fn url(&self, api: &str) -> String {
        format!("{}/{}", self.base_url, api)
    }
}

#[async_trait]
impl SpeechRepository for GoogleSpeechRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, RepositoryError> {
        let token = self.bearer_token().await?;
        let start_time = std::time::Instant::now();

        let body = SynthesizeSpeechBody {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelection {
                language_code: &request.language_code,
                name: &request.voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: request.speaking_rate,
                pitch: request.pitch,
            },
        };

        tracing::info!(
            voice = %request.voice_name,
            language = %request.language_code,
            speaking_rate = request.speaking_rate,
            pitch = request.pitch,
            text_length = request.text.len(),
            "Calling Google text:synthesize"
        );

        let response = self
            .http_client
            .post(self.url(SYNTHESIZE_API))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(SYNTHESIZE_API, e))?;

        let payload: SynthesizeSpeechResponse = read_json(response, SYNTHESIZE_API).await?;

        let audio = STANDARD.decode(payload.audio_content.as_bytes()).map_err(|e| {
            RepositoryError::Upstream(format!("Failed to decode audio content: {}", e))
        })?;

        tracing::info!(
            provider = "google",
            voice = %request.voice_name,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = request.text.chars().count(),
            audio_size_bytes = audio.len(),
            "Speech synthesis completed"
        );

        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, RepositoryError> {
        let token = self.bearer_token().await?;

        let response = self
            .http_client
            .get(self.url(VOICES_API))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport_error(VOICES_API, e))?;

        let payload: ListVoicesResponse = read_json(response, VOICES_API).await?;

        tracing::debug!(voice_count = payload.voices.len(), "Google voices listed");

        Ok(payload.voices.into_iter().map(VoiceDescriptor::from).collect())
    }
}
