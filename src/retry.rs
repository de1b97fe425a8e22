use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{CrawlError, FetchError};

/// Runs `fetch_fn` with bounded retries and exponential backoff.
///
/// Transient failures wait `2^attempt` seconds (attempt starting at 1) and
/// retry, up to `max_retries` attempts in total; exhaustion fails with
/// `RetryLimitExceeded`. Permanent failures propagate immediately without
/// retry. Cancellation is observed at both suspension points, so an
/// in-progress retry loop aborts promptly instead of finishing its budget.
pub async fn fetch_with_retry<F, Fut>(
    url: &str,
    max_retries: u32,
    cancel: &CancellationToken,
    fetch_fn: F,
) -> Result<String, CrawlError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    for attempt in 1..=max_retries {
        let outcome = tokio::select! {
            outcome = fetch_fn() => outcome,
            _ = cancel.cancelled() => return Err(CrawlError::Cancelled),
        };

        match outcome {
            Ok(content) => return Ok(content),
            Err(err) if !err.is_transient() => {
                return Err(CrawlError::FetchFailed {
                    url: url.to_string(),
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                if attempt >= max_retries {
                    ::log::warn!("Giving up on {} after {} attempts: {}", url, attempt, err);
                    return Err(CrawlError::RetryLimitExceeded {
                        url: url.to_string(),
                        attempts: attempt,
                    });
                }
                let wait = Duration::from_secs(2u64.pow(attempt));
                ::log::debug!(
                    "Retrying {} in {}s after transient failure: {}",
                    url,
                    wait.as_secs(),
                    err
                );
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = cancel.cancelled() => return Err(CrawlError::Cancelled),
                }
            }
        }
    }

    // max_retries is >= 1 in practice; a zero budget means no attempt was allowed
    Err(CrawlError::RetryLimitExceeded {
        url: url.to_string(),
        attempts: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_after_two_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let counter = Arc::clone(&calls);
        let result = fetch_with_retry("https://example.com", 3, &cancel, || {
            let counter = Arc::clone(&counter);
            async move {
                let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if call <= 2 {
                    Err(FetchError::Transient("connection reset".to_string()))
                } else {
                    Ok("<html></html>".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "<html></html>");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_exactly_max_retries_invocations() {
        let calls = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let counter = Arc::clone(&calls);
        let result = fetch_with_retry("https://example.com", 3, &cancel, || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>(FetchError::Transient("timed out".to_string()))
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(CrawlError::RetryLimitExceeded { attempts: 3, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let counter = Arc::clone(&calls);
        let result = fetch_with_retry("https://example.com", 3, &cancel, || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>(FetchError::Permanent("404 Not Found".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(CrawlError::FetchFailed { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_short_circuits_without_delay() {
        let cancel = CancellationToken::new();
        let started = std::time::Instant::now();

        let result = fetch_with_retry("https://example.com", 3, &cancel, || async {
            Ok::<_, FetchError>("page".to_string())
        })
        .await;

        assert_eq!(result.unwrap(), "page");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_the_backoff_promptly() {
        let cancel = CancellationToken::new();
        let cancel_during_backoff = cancel.clone();

        let handle = tokio::spawn(async move {
            fetch_with_retry("https://example.com", 3, &cancel_during_backoff, || async {
                Err::<String, _>(FetchError::Transient("connection reset".to_string()))
            })
            .await
        });

        // Let the first attempt fail and enter its backoff sleep
        tokio::task::yield_now().await;
        cancel.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(CrawlError::Cancelled)));
    }
}
