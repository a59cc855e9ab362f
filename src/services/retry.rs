//! Caller-side retries for idempotent reads.
//!
//! [`ApiClient`](crate::http::ApiClient) never retries. Callers that know an
//! operation is safe to repeat (a `GET`) can wrap it here. Only transient
//! kinds are retried: network failures, timeouts and 5xx responses.

use std::future::Future;
use std::time::{Duration, SystemTime};

use log::warn;
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{RetryDecision, RetryPolicy};

use crate::http::{ApiError, ApiErrorKind};

pub fn default_policy(max_retries: u32) -> ExponentialBackoff {
    ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(250), Duration::from_secs(5))
        .build_with_max_retries(max_retries)
}

pub fn is_transient(err: &ApiError) -> bool {
    matches!(
        err.kind(),
        ApiErrorKind::NetworkError | ApiErrorKind::Timeout | ApiErrorKind::ServerError
    )
}

/// Runs `operation` until it succeeds, fails permanently, or `policy` gives up.
pub async fn with_retry<T, F, Fut, P>(policy: &P, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    P: RetryPolicy,
{
    let started_at = SystemTime::now();
    let mut past_retries: u32 = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_transient(&err) => return Err(err),
            Err(err) => err,
        };

        match policy.should_retry(started_at, past_retries) {
            RetryDecision::Retry { execute_after } => {
                let wait = execute_after
                    .duration_since(SystemTime::now())
                    .unwrap_or(Duration::ZERO);
                past_retries += 1;
                warn!(
                    attempt = past_retries,
                    wait_ms = wait.as_millis() as u64,
                    kind:% = err.kind(),
                    error:% = err;
                    "Transient API failure, retrying"
                );
                tokio::time::sleep(wait).await;
            },
            RetryDecision::DoNotRetry => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast_policy(max_retries: u32) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(1), Duration::from_millis(5))
            .build_with_max_retries(max_retries)
    }

    #[tokio::test]
    async fn test_retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = with_retry(&fast_policy(3), move || async move {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Err(ApiError::from_status(503, "unavailable")),
                1 => Err(ApiError::timeout(Duration::from_millis(10))),
                _ => Ok("balances"),
            }
        })
        .await;

        assert_eq!(result.unwrap(), "balances");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_validation_errors() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let err = with_retry(&fast_policy(3), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ApiError::from_status(422, "bad filter"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::ValidationError);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let err = with_retry(&fast_policy(2), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ApiError::network(std::io::Error::other("refused")))
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::NetworkError);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&ApiError::from_status(500, "")));
        assert!(!is_transient(&ApiError::from_status(401, "")));
        assert!(!is_transient(&ApiError::from_status(404, "")));
        assert!(!is_transient(&ApiError::unknown("", None)));
    }
}
