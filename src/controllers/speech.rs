use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechService, SpeechServiceApi, SynthesizeRequest, VoicesResponse},
    error::{AppError, AppResult},
};

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// POST /synthesize - Convert text to MP3 audio
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SynthesizeRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(request) = payload?;

        let result = controller.speech_service.synthesize(request).await?;

        tracing::info!(
            voice = %result.voice_name,
            language = %result.language_code,
            bytes = result.audio_data.len(),
            "Speech synthesized"
        );

        let filename = format!("tts_{}.mp3", Utc::now().timestamp_millis());
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CONTENT_DISPOSITION, disposition);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }

    /// GET /voices - Vendor voice catalog
    pub async fn list_voices(
        State(controller): State<Arc<SpeechController>>,
    ) -> AppResult<Json<VoicesResponse>> {
        let voices = controller.speech_service.list_voices().await?;
        Ok(Json(VoicesResponse { voices }))
    }
}
