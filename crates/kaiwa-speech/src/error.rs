//! Speech client error types.

use thiserror::Error;

pub type SpeechResult<T> = Result<T, SpeechError>;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SpeechError::ServiceUnavailable(_) | SpeechError::Timeout(_) | SpeechError::Network(_)
        )
    }
}
