//! Bounded retry with exponential backoff and jitter.
//!
//! The delay before attempt `k + 1` is `base * 2^(k - 1)` plus a uniform
//! jitter in `[0, max_jitter)`. Only retryable kinds are retried; the last
//! error is returned as-is once the budget runs out.

use std::future::Future;
use std::time::Duration;

use ff_config::RetrySettings;

use crate::error::GeneratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RetrySettings::default())
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn from_settings(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_jitter: Duration::from_millis(settings.max_jitter_ms),
        }
    }

    /// No waiting between attempts. For tests.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    /// Deterministic part of the delay after `failed_attempt` (1-based) failed.
    #[must_use]
    pub fn backoff(&self, failed_attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(failed_attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Full delay after `failed_attempt`, jitter included.
    #[must_use]
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        self.backoff(failed_attempt)
            .saturating_add(jitter(self.max_jitter))
    }
}

fn jitter(max: Duration) -> Duration {
    let Ok(max_ms) = u64::try_from(max.as_millis()) else {
        return Duration::ZERO;
    };
    if max_ms == 0 {
        return Duration::ZERO;
    }
    let mut bytes = [0u8; 8];
    if getrandom::fill(&mut bytes).is_err() {
        return Duration::ZERO;
    }
    Duration::from_millis(u64::from_le_bytes(bytes) % max_ms)
}

/// A successful value and how many attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

/// Run `op` until it succeeds, fails fatally, or the budget is spent.
///
/// # Errors
///
/// Returns the first non-retryable error immediately, or the last retryable
/// error once `policy.max_attempts` attempts have failed.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<Retried<T>, GeneratorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeneratorError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(Retried { value, attempts: attempt }),
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    kind = %error.kind,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "generator call failed; retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, GeneratorError};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_doubles_from_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(400));
        assert_eq!(policy.backoff(2), Duration::from_millis(800));
        assert_eq!(policy.backoff(3), Duration::from_millis(1600));
    }

    #[test]
    fn jitter_stays_below_max() {
        let policy = RetryPolicy::default();
        for _ in 0..50 {
            let delay = policy.delay_after(1);
            assert!(delay >= Duration::from_millis(400));
            assert!(delay < Duration::from_millis(650));
        }
    }

    #[tokio::test]
    async fn two_unavailable_then_success_takes_three_attempts() {
        let calls = &AtomicU32::new(0);
        let result = with_retry(&RetryPolicy::immediate(3), || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= 2 {
                Err(GeneratorError::classified(Some(503), "overloaded"))
            } else {
                Ok("plan")
            }
        })
        .await
        .unwrap();

        assert_eq!(result, Retried { value: "plan", attempts: 3 });
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_error_is_never_retried() {
        let calls = &AtomicU32::new(0);
        let err = with_retry(&RetryPolicy::immediate(3), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(GeneratorError::classified(Some(400), "API key not valid"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_budget_returns_last_error_verbatim() {
        let calls = &AtomicU32::new(0);
        let err = with_retry(&RetryPolicy::immediate(3), || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err::<(), _>(GeneratorError::classified(Some(429), format!("busy {n}")))
        })
        .await
        .unwrap_err();

        assert_eq!(err, GeneratorError::new(ErrorKind::RateLimited, Some(429), "busy 3"));
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let result = with_retry(&RetryPolicy::immediate(0), || async { Ok::<_, GeneratorError>(1) })
            .await
            .unwrap();
        assert_eq!(result.attempts, 1);
    }
}
