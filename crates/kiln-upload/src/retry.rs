//! Exponential backoff for single storage requests.
//!
//! Only errors that [`StorageError::is_transient`] accepts are retried.
//! The delay before retry `n` (zero-based) is `base_delay * 2^n`, capped
//! at `max_delay`; a server `Retry-After` longer than that wins.

use std::future::Future;
use std::time::Duration;

use kiln_config::UploadConfig;
use kiln_storage::StorageError;

use crate::error::UploadError;

/// Retry budget for one storage request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for RetryPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_delay(),
            max_delay: config.max_delay(),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failed attempt `attempt` (zero-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    const fn attempts(&self) -> u32 {
        if self.max_retries == 0 { 1 } else { self.max_retries }
    }
}

/// Run `op` until it succeeds, fails permanently, or the budget runs out.
///
/// # Errors
///
/// Permanent storage errors are returned on first sight (offset mismatches
/// as [`UploadError::OffsetMismatch`]); a transient error on the last
/// attempt becomes [`UploadError::RetriesExhausted`].
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, UploadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() => return Err(error.into()),
            Err(error) if attempt + 1 >= attempts => {
                tracing::error!(operation, attempts, %error, "retries exhausted");
                return Err(UploadError::RetriesExhausted {
                    operation,
                    attempts,
                    source: error,
                });
            }
            Err(error) => {
                let mut delay = policy.backoff(attempt);
                if let StorageError::RateLimited { retry_after_secs } = &error {
                    delay = delay.max(Duration::from_secs(*retry_after_secs));
                }
                attempt += 1;
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = attempts,
                    ?delay,
                    %error,
                    "transient storage error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
