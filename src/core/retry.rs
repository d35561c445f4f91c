//! Retry policy for backend requests.
//!
//! A policy is a maximum attempt count, a backoff function giving the delay
//! before each retry, and a predicate deciding which errors are retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::core::constants::{RETRY_BASE_DELAY, RETRY_MAX_ATTEMPTS};
use crate::error::{Error, Result};

type Backoff = Arc<dyn Fn(u32) -> Duration + Send + Sync>;
type Predicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// How a failed operation is retried.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
    should_retry: Predicate,
}

impl RetryPolicy {
    /// Create a policy allowing `max_attempts` total attempts (at least one).
    ///
    /// `backoff(n)` is the delay slept before retry `n`, counting from 1.
    pub fn new<B, P>(max_attempts: u32, backoff: B, should_retry: P) -> Self
    where
        B: Fn(u32) -> Duration + Send + Sync + 'static,
        P: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Arc::new(backoff),
            should_retry: Arc::new(should_retry),
        }
    }

    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, |_| Duration::ZERO, |_| false)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds, the predicate rejects its error, or the
    /// attempts are used up. The last error is returned on failure.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.max_attempts || !(self.should_retry)(&err) {
                        return Err(err);
                    }

                    let delay = (self.backoff)(attempt);
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    /// Ten attempts with full-jitter backoff from a 40ms base.
    ///
    /// Every error is retried, including 403 and 404 responses that will
    /// not change between attempts.
    fn default() -> Self {
        Self::new(RETRY_MAX_ATTEMPTS, full_jitter(RETRY_BASE_DELAY), |_| true)
    }
}

/// Full-jitter exponential backoff.
///
/// Before retry `n` the delay is drawn uniformly from `[0, base * 2^(n-1))`.
pub fn full_jitter(base: Duration) -> impl Fn(u32) -> Duration + Send + Sync + 'static {
    move |retry| {
        let bound = jitter_bound(base, retry);
        if bound.is_zero() {
            return Duration::ZERO;
        }
        let micros = rand::thread_rng().gen_range(0..bound.as_micros() as u64);
        Duration::from_micros(micros)
    }
}

/// Upper (exclusive) bound of the delay before retry `n`.
fn jitter_bound(base: Duration, retry: u32) -> Duration {
    let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}
