use super::error::SpeechServiceError;
use super::voice::{language_for_voice, sort_by_name, VoiceDescriptor};
use super::{
    SynthesisRequest, SynthesizeRequest, DEFAULT_PITCH, DEFAULT_SPEAKING_RATE, MAX_PITCH,
    MAX_SPEAKING_RATE, MIN_PITCH, MIN_SPEAKING_RATE,
};
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Voice used when the client does not pick one
#[derive(Debug, Clone)]
pub struct VoiceDefaults {
    pub voice_name: String,
    pub language_code: String,
}

#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio_data: Vec<u8>,
    pub voice_name: String,
    pub language_code: String,
}

pub struct SpeechService {
    speech_repo: Arc<dyn SpeechRepository>,
    defaults: VoiceDefaults,
}

impl SpeechService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, defaults: VoiceDefaults) -> Self {
        Self {
            speech_repo,
            defaults,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Synthesize text to MP3.
    ///
    /// This operation:
    /// - Rejects missing or blank text before calling the vendor
    /// - Fills in voice, language, rate and pitch defaults
    /// - Calls the vendor exactly once
    async fn synthesize(
        &self,
        request: SynthesizeRequest,
    ) -> Result<SynthesizedAudio, SpeechServiceError>;

    /// Full vendor voice catalog sorted by name
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(
        &self,
        request: SynthesizeRequest,
    ) -> Result<SynthesizedAudio, SpeechServiceError> {
        let synthesis = self.build_request(request)?;

        tracing::info!(
            voice = %synthesis.voice_name,
            language = %synthesis.language_code,
            text_length = synthesis.text.chars().count(),
            "Speech synthesis request"
        );

        let audio_data = self.speech_repo.synthesize(&synthesis).await?;
        if audio_data.is_empty() {
            tracing::error!(voice = %synthesis.voice_name, "Vendor returned no audio payload");
            return Err(SpeechServiceError::NoAudio);
        }

        Ok(SynthesizedAudio {
            audio_data,
            voice_name: synthesis.voice_name,
            language_code: synthesis.language_code,
        })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SpeechServiceError> {
        let mut voices = self.speech_repo.list_voices().await?;
        sort_by_name(&mut voices);
        Ok(voices)
    }
}

impl SpeechService {
    fn build_request(
        &self,
        request: SynthesizeRequest,
    ) -> Result<SynthesisRequest, SpeechServiceError> {
        let text = match request.text {
            Some(Value::String(text)) if !text.trim().is_empty() => text,
            _ => return Err(SpeechServiceError::Invalid("text is required".to_string())),
        };

        // An explicit voice carries its own language; the configured language
        // only pairs with the configured voice.
        let (voice_name, language_code) = match request.voice {
            Some(Value::String(voice)) if !voice.trim().is_empty() => {
                let voice = voice.trim().to_string();
                let language = language_for_voice(&voice)
                    .unwrap_or_else(|| self.defaults.language_code.clone());
                (voice, language)
            }
            _ => (
                self.defaults.voice_name.clone(),
                self.defaults.language_code.clone(),
            ),
        };

        Ok(SynthesisRequest {
            text,
            voice_name,
            language_code,
            speaking_rate: number_or(
                request.rate.as_ref(),
                DEFAULT_SPEAKING_RATE,
                MIN_SPEAKING_RATE,
                MAX_SPEAKING_RATE,
            ),
            pitch: number_or(request.pitch.as_ref(), DEFAULT_PITCH, MIN_PITCH, MAX_PITCH),
        })
    }
}

/// JSON numbers are clamped into range; anything else takes the default
fn number_or(value: Option<&Value>, default: f64, min: f64, max: f64) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.clamp(min, max))
        .unwrap_or(default)
}
