//! Retry with exponential backoff for remote calls.
//!
//! Only failures classified as retryable (rate limiting, quota exhaustion)
//! are retried; anything else is returned on the spot. The same wrapper is
//! used for the upload, every status poll and the analysis request, so
//! backoff compounds under sustained rate limiting.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use vsafe_gemini::{ErrorKind, GeminiError};

use crate::error::AnalyzerError;
use crate::metrics::record_retry;

/// Decides whether an error is worth another attempt.
pub trait Classify {
    fn is_retryable(&self) -> bool;
}

impl Classify for GeminiError {
    fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Retryable
    }
}

impl Classify for AnalyzerError {
    fn is_retryable(&self) -> bool {
        AnalyzerError::is_retryable(self)
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles for each one after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Set the total number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base delay for exponential backoff.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Wait before 0-indexed attempt `attempt` (`attempt >= 1`):
    /// `base_delay * 2^(attempt - 1)`.
    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.checked_pow(attempt - 1).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Execute an async remote operation, retrying retryable failures.
///
/// Returns the first success, the first non-retryable error, or the last
/// retryable error once `max_attempts` attempts have been made.
///
/// # Example
/// ```ignore
/// let policy = RetryPolicy::default();
/// let job = call_with_retry(&policy, "upload", || service.upload(path)).await?;
/// ```
pub async fn call_with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify + Display,
{
    let attempts = policy.attempts();
    let mut attempt = 0u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                attempt += 1;
                let delay = policy.delay_before_attempt(attempt);
                warn!(
                    operation = %operation,
                    attempt = attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying: {}",
                    e
                );
                record_retry(operation);
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                if e.is_retryable() {
                    debug!(operation = %operation, attempts, "Retry budget exhausted");
                }
                return Err(e);
            }
        }
    }
}
