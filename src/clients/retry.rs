//! Throttling retry policy.
//!
//! The service signals rate limiting with `429 Too Many Requests` and a wait
//! hint in `x-ms-retry-after-ms`. The service is the authority on pacing, so
//! the policy sleeps exactly the hinted duration (no jitter, no multiplier)
//! and re-issues the request. Only throttling is retried; every other outcome
//! is returned to the caller unchanged.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::clients::errors::{CosmosError, StatusError};
use crate::config::{CosmosConfig, DEFAULT_THROTTLE_FALLBACK_WAIT};

/// Re-issues throttled requests after the service's wait hint.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use cosmosdb::clients::RetryPolicy;
///
/// let policy = RetryPolicy::new(Duration::from_millis(100), None);
/// assert_eq!(policy.fallback_wait(), Duration::from_millis(100));
/// assert!(policy.max_retries().is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    fallback_wait: Duration,
    max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_FALLBACK_WAIT, None)
    }
}

impl RetryPolicy {
    /// Creates a policy.
    ///
    /// `fallback_wait` applies when a throttled response carries no hint.
    /// `max_retries` of `None` retries for as long as the service throttles.
    #[must_use]
    pub const fn new(fallback_wait: Duration, max_retries: Option<u32>) -> Self {
        Self {
            fallback_wait,
            max_retries,
        }
    }

    /// Creates the policy described by a client configuration.
    #[must_use]
    pub const fn from_config(config: &CosmosConfig) -> Self {
        Self::new(
            config.throttle_fallback_wait(),
            config.max_throttle_retries(),
        )
    }

    /// Returns the wait used when no hint is given.
    #[must_use]
    pub const fn fallback_wait(&self) -> Duration {
        self.fallback_wait
    }

    /// Returns the retry cap, `None` meaning unbounded.
    #[must_use]
    pub const fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Returns how long to wait before re-issuing a throttled request.
    #[must_use]
    pub fn wait_for(&self, error: &StatusError) -> Duration {
        error.retry_after.unwrap_or(self.fallback_wait)
    }

    /// Runs `attempt` until it yields anything other than a throttling error.
    ///
    /// The sleep between attempts is bounded by `deadline`; if the deadline
    /// passes first the call fails with [`CosmosError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns the first non-throttling error of `attempt` unchanged,
    /// [`CosmosError::MaxRetries`] once a configured cap is exceeded, or
    /// [`CosmosError::Timeout`] if the deadline passes while waiting.
    pub async fn run<T, F, Fut>(
        &self,
        deadline: Option<Instant>,
        mut attempt: F,
    ) -> Result<T, CosmosError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CosmosError>>,
    {
        let mut retries: u32 = 0;
        loop {
            let error = match attempt().await {
                Err(CosmosError::Status(error)) if error.is_throttled() => error,
                other => return other,
            };

            if self.max_retries.is_some_and(|max| retries >= max) {
                return Err(CosmosError::MaxRetries {
                    tries: retries + 1,
                    last: error,
                });
            }
            retries += 1;

            let wait = self.wait_for(&error);
            tracing::warn!(
                retry = retries,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                activity_id = error.activity_id.as_deref().unwrap_or_default(),
                "Request throttled by Cosmos DB, retrying after the service's wait hint"
            );

            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, tokio::time::sleep(wait))
                        .await
                        .is_err()
                    {
                        return Err(CosmosError::Timeout);
                    }
                }
                None => tokio::time::sleep(wait).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn status(http_status: u16, retry_after: Option<Duration>) -> StatusError {
        StatusError {
            http_status,
            code: String::new(),
            message: String::new(),
            activity_id: None,
            retry_after,
        }
    }

    #[test]
    fn test_wait_honors_hint_then_fallback() {
        let policy = RetryPolicy::new(Duration::from_millis(100), None);
        assert_eq!(
            policy.wait_for(&status(429, Some(Duration::from_millis(7)))),
            Duration::from_millis(7)
        );
        assert_eq!(
            policy.wait_for(&status(429, None)),
            Duration::from_millis(100)
        );
    }

    #[tokio::test]
    async fn test_throttling_is_absorbed() {
        let policy = RetryPolicy::new(Duration::ZERO, None);
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = policy
            .run(None, move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(CosmosError::Status(status(429, Some(Duration::ZERO))))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let policy = RetryPolicy::new(Duration::ZERO, None);
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = policy
            .run(None, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CosmosError::Status(status(503, None)))
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cap_produces_max_retries() {
        let policy = RetryPolicy::new(Duration::ZERO, Some(2));
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = policy
            .run(None, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CosmosError::Status(status(429, None)))
            })
            .await;

        assert!(matches!(
            result,
            Err(CosmosError::MaxRetries { tries: 3, ref last }) if last.is_throttled()
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_sleep() {
        let policy = RetryPolicy::default();
        let deadline = Instant::now() + Duration::from_secs(1);
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = policy
            .run(Some(deadline), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CosmosError::Status(status(
                    429,
                    Some(Duration::from_secs(60)),
                )))
            })
            .await;

        assert!(matches!(result, Err(CosmosError::Timeout)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
