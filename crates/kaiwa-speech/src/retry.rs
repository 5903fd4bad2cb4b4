//! Retry with exponential backoff for retryable client failures.

use std::time::Duration;

use tracing::warn;

use crate::error::{SpeechError, SpeechResult};

/// Execute `operation`, retrying retryable failures up to `max_retries`
/// times with exponential backoff (500ms, 1s, 2s, ...).
///
/// Non-retryable errors return immediately; the engine itself never
/// retries, only these network-bound collaborators do.
pub(crate) async fn with_retry<F, Fut, T>(max_retries: u32, operation: F) -> SpeechResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = SpeechResult<T>>,
{
    let mut last_error = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                warn!(
                    "Speech request failed (attempt {}), retrying in {:?}: {}",
                    attempt + 1,
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or(SpeechError::RequestFailed("Unknown error".to_string())))
}
