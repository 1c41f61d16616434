//! Bounded retry with linear backoff for transient transport failures.
//!
//! Only [`ApiError::is_retryable`] failures (timeouts and connection-level
//! errors) are repeated. Everything else returns on first occurrence.
//! Both the attempt and the backoff sleep race the caller's cancellation
//! token, so a cancelled call stops promptly and drops any in-flight request.

use crate::error::ApiError;

use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use log::{debug, warn};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; values below 1 are raised to 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Fresh backoff schedule for one logical call.
    pub fn backoff(&self) -> LinearBackoff {
        LinearBackoff::new(self.base_delay, self.max_attempts)
    }

    /// Run `attempt_fn` until it succeeds, fails non-retryably, runs out of
    /// attempts, or `cancel` fires.
    ///
    /// `attempt_fn` receives the 1-based attempt number.
    pub async fn execute<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut attempt_fn: F,
    ) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut backoff = self.backoff();
        let mut attempt = 1;

        loop {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::cancelled()),
                outcome = attempt_fn(attempt) => outcome,
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(error) if !error.is_retryable() => return Err(error),
                Err(error) => error,
            };

            let Some(delay) = backoff.next_backoff() else {
                warn!("Giving up after {attempt} attempts: {error}");
                return Err(ApiError::retries_exhausted(attempt, error));
            };

            debug!(
                "Attempt {attempt}/{} failed ({}), retrying after {delay:?}",
                self.max_attempts,
                error.error_category()
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ApiError::cancelled()),
                () = sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}

/// Delay before attempt `k` (k ≥ 2) is `base_delay * (k - 1)`.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base_delay: Duration,
    max_attempts: u32,
    retries_issued: u32,
}

impl LinearBackoff {
    pub fn new(base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_attempts: max_attempts.max(1),
            retries_issued: 0,
        }
    }
}

impl Backoff for LinearBackoff {
    fn reset(&mut self) {
        self.retries_issued = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.retries_issued + 1 >= self.max_attempts {
            return None;
        }

        self.retries_issued += 1;
        Some(self.base_delay.saturating_mul(self.retries_issued))
    }
}
