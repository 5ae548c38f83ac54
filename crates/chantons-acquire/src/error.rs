use thiserror::Error;

/// Failures while talking to the catalogue.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The page came back but lacked the markup we rely on
    /// (typically the search form's CSRF token).
    #[error("unexpected catalogue page: {0}")]
    Protocol(String),

    /// Network failure, timeout, or non-success HTTP status.
    #[error("catalogue request failed: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for AcquireError {
    fn from(err: reqwest::Error) -> Self {
        AcquireError::Upstream(err.to_string())
    }
}
