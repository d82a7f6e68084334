use crate::infrastructure::oauth::ServiceAccountKey;
use std::env;

const DEFAULT_TTS_API_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";
const DEFAULT_YT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Google Cloud Text-to-Speech
    pub tts_credentials: Option<ServiceAccountKey>,
    pub tts_language: String,
    pub tts_voice: String,
    pub tts_api_base_url: String,
    // YouTube Data API
    pub youtube_api_key: Option<String>,
    pub youtube_api_base_url: String,
    // Vendor calls
    pub upstream_timeout_secs: u64,
    pub static_dir: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        // A present but malformed credential blob is a startup error; an absent
        // one only fails the speech endpoints.
        let tts_credentials = match non_empty_var("GCP_TTS_CREDENTIALS_JSON") {
            Some(json) => Some(ServiceAccountKey::from_json(&json)?),
            None => None,
        };

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            tts_credentials,
            tts_language: env::var("GCP_TTS_LANGUAGE").unwrap_or_else(|_| "ko-KR".to_string()),
            tts_voice: env::var("GCP_TTS_VOICE")
                .unwrap_or_else(|_| "ko-KR-Standard-A".to_string()),
            tts_api_base_url: env::var("GCP_TTS_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TTS_API_BASE_URL.to_string()),
            youtube_api_key: non_empty_var("YT_API_KEY"),
            youtube_api_base_url: env::var("YT_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YT_API_BASE_URL.to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        };

        Ok(config)
    }

    pub fn speech_configured(&self) -> bool {
        self.tts_credentials.is_some()
    }

    pub fn youtube_configured(&self) -> bool {
        self.youtube_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
