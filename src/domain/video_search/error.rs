use crate::error::AppError;
use crate::infrastructure::repositories::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum VideoSearchError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<RepositoryError> for VideoSearchError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotConfigured(msg) => VideoSearchError::NotConfigured(msg),
            RepositoryError::Upstream(msg) => VideoSearchError::Dependency(msg),
        }
    }
}

impl From<VideoSearchError> for AppError {
    fn from(err: VideoSearchError) -> Self {
        match err {
            VideoSearchError::Invalid(msg) => AppError::BadRequest(msg),
            VideoSearchError::NotConfigured(msg) => AppError::Configuration(msg),
            VideoSearchError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
