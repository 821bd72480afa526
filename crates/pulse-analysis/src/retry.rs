//! Retry with exponential backoff for fallible async operations.
//!
//! Every error is treated as retryable. Intermediate errors are only visible
//! to the optional observer and the `tracing` warn events; once attempts are
//! exhausted the last error is returned unchanged.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use pulse_config::RetrySettings;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one). `0` behaves as `1`.
    pub max_attempts: u32,
    /// Base delay; the delay after `n` failures is `base_delay * 2^n` with backoff.
    pub base_delay: Duration,
    /// Maximum delay between attempts (backoff is capped here).
    pub max_delay: Duration,
    /// Grow the delay exponentially when true; wait `base_delay` every time otherwise.
    pub backoff: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff: true,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff: settings.backoff,
        }
    }
}

impl RetryConfig {
    /// Attempts actually performed.
    #[must_use]
    pub const fn attempt_limit(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }

    /// Delay to wait after `failed_attempts` consecutive failures.
    ///
    /// Never exceeds `max_delay`, even when `base_delay` alone is larger.
    #[must_use]
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        let delay = if self.backoff {
            let factor = 2_u32.checked_pow(failed_attempts).unwrap_or(u32::MAX);
            self.base_delay.saturating_mul(factor)
        } else {
            self.base_delay
        };
        delay.min(self.max_delay)
    }
}

/// Run `operation` until it succeeds or `config` runs out of attempts.
///
/// # Errors
///
/// Returns the error from the final attempt.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    with_retry_observed(config, |_, _| {}, operation).await
}

/// Like [`with_retry`], calling `observer` before each wait with the
/// 1-based count of failed attempts and the error that caused the retry.
///
/// # Errors
///
/// Returns the error from the final attempt.
pub async fn with_retry_observed<T, E, F, Fut, O>(
    config: &RetryConfig,
    mut observer: O,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    O: FnMut(u32, &E),
{
    let max_attempts = config.attempt_limit();
    let mut failed = 0_u32;

    loop {
        match operation().await {
            Ok(value) => {
                if failed > 0 {
                    tracing::debug!(attempt = failed + 1, "operation succeeded after retries");
                }
                return Ok(value);
            }
            Err(error) => {
                failed += 1;
                if failed >= max_attempts {
                    tracing::debug!(attempts = failed, %error, "retries exhausted");
                    return Err(error);
                }

                let delay = config.delay_for(failed);
                observer(failed, &error);
                tracing::warn!(
                    attempt = failed,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %error,
                    "operation failed, will retry"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
