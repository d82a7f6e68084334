use super::RepositoryError;
use crate::domain::speech::{SynthesisRequest, VoiceDescriptor};
use async_trait::async_trait;

/// Repository for speech synthesis operations.
/// Abstracts the underlying speech vendor (Google Cloud Text-to-Speech).
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize text to MP3 audio.
    ///
    /// Returns the decoded audio bytes. An empty vector means the vendor
    /// answered without an audio payload.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, RepositoryError>;

    /// List every voice the vendor offers, in vendor order
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, RepositoryError>;
}
