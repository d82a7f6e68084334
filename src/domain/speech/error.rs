use crate::error::AppError;
use crate::infrastructure::repositories::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("no audio")]
    NoAudio,
}

impl From<RepositoryError> for SpeechServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotConfigured(msg) => SpeechServiceError::NotConfigured(msg),
            RepositoryError::Upstream(msg) => SpeechServiceError::Dependency(msg),
        }
    }
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::NotConfigured(msg) => AppError::Configuration(msg),
            SpeechServiceError::Dependency(msg) => AppError::ExternalService(msg),
            SpeechServiceError::NoAudio => {
                AppError::ExternalService("no audio".to_string())
            }
        }
    }
}
