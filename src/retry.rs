use crate::error::TranslateError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that can tell whether another attempt is worthwhile.
pub trait Retryable {
    /// Whether the failed operation should be attempted again.
    fn is_retryable(&self) -> bool;

    /// Minimum wait requested by the remote side, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl Retryable for TranslateError {
    fn is_retryable(&self) -> bool {
        TranslateError::is_retryable(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        TranslateError::retry_after(self)
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one), never below 1
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay, including server hints
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles the delay each time)
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Create a new retry configuration. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    /// Set the attempt budget, clamped to at least 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: retries for a single translated value (3 attempts)
    /// Delays: 500ms, 1s = 1.5s worst-case wait per key
    pub fn per_key() -> Self {
        Self::new(3, Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(4))
            .with_backoff_multiplier(2.0)
    }

    /// Preset: a single attempt, failures surface immediately
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-indexed), raised to `hint` when the
    /// server asked for a longer pause. Always capped at `max_delay`.
    fn delay_before_retry(&self, retry: u32, hint: Option<Duration>) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let backoff = Duration::from_millis(delay_ms.min(u64::MAX as f64) as u64);

        let delay = match hint {
            Some(hint) => backoff.max(hint),
            None => backoff,
        };
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::per_key()
    }
}

/// Execute an async operation, retrying retryable errors with exponential backoff
///
/// Non-retryable errors are returned immediately. When every attempt fails the
/// error from the last attempt is returned.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name, attempt, max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            debug!(
                "{}: Error is not retryable, failing immediately: {}",
                operation_name, error
            );
            return Err(error);
        }

        if attempt >= max_attempts {
            warn!(
                "{}: All {} attempts failed. Last error: {}",
                operation_name, max_attempts, error
            );
            return Err(error);
        }

        let delay = config.delay_before_retry(attempt, error.retry_after());
        warn!(
            "{}: Attempt {}/{} failed ({}), retrying in {:?}",
            operation_name, attempt, max_attempts, error, delay
        );
        sleep(delay).await;
    }
}
