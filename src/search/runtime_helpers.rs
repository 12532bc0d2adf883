//! Retry helper for transient index failures
//!
//! Acquiring the index writer fails while another writer holds the lock;
//! `retry_task` retries such operations with exponential backoff.

use std::future::Future;

use super::errors::{RetryConfig, SearchResult};

/// Retry an operation with configurable retry logic
///
/// Non-transient errors are returned immediately. Transient errors are
/// retried up to `config.max_attempts` times, sleeping
/// `config.delay_for_attempt(n)` between attempts.
pub async fn retry_task<F, Fut, T>(config: RetryConfig, mut operation: F) -> SearchResult<T>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = SearchResult<T>> + Send,
    T: Send + 'static,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                if !e.is_transient() {
                    return Err(e);
                }

                if attempt >= config.max_attempts {
                    tracing::error!(
                        attempts = attempt + 1,
                        error = %e,
                        "Max retry attempts exceeded"
                    );
                    return Err(e);
                }

                let delay = config.delay_for_attempt(attempt);
                attempt += 1;

                tracing::warn!(
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    error = %e,
                    "Transient error, retrying after delay"
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}
