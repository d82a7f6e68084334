/// Failure of a vendor adapter
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// Credentials or keys are missing or unusable
    #[error("{0}")]
    NotConfigured(String),

    /// The vendor call failed or returned an unusable payload
    #[error("{0}")]
    Upstream(String),
}
