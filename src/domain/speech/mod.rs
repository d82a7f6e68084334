pub mod error;
pub mod service;
pub mod voice;

pub use error::SpeechServiceError;
pub use service::{SpeechService, SpeechServiceApi, SynthesizedAudio, VoiceDefaults};
pub use voice::{language_for_voice, sort_by_name, VoiceDescriptor};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SPEAKING_RATE: f64 = 1.05;
pub const MIN_SPEAKING_RATE: f64 = 0.25;
pub const MAX_SPEAKING_RATE: f64 = 4.0;
pub const DEFAULT_PITCH: f64 = 0.0;
pub const MIN_PITCH: f64 = -20.0;
pub const MAX_PITCH: f64 = 20.0;

/// Request for POST /synthesize
///
/// Fields stay loosely typed: a value of the wrong JSON type falls back to
/// its default instead of rejecting the whole request.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizeRequest {
    pub text: Option<Value>,
    pub voice: Option<Value>,
    pub rate: Option<Value>,
    pub pitch: Option<Value>,
}

/// Validated parameters handed to the speech vendor
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_name: String,
    pub language_code: String,
    pub speaking_rate: f64,
    pub pitch: f64,
}

/// Response for GET /voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceDescriptor>,
}
