use crate::error::ApiError;
use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, LinearBackoff, RetryPolicy};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::backoff::Backoff;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn counter() -> Arc<AtomicU32> {
    Arc::new(AtomicU32::new(0))
}

#[test]
fn given_default_policy_when_inspected_then_three_attempts_one_second_base() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(policy.base_delay(), DEFAULT_BASE_DELAY);
}

#[test]
fn given_zero_attempts_when_policy_created_then_raised_to_one() {
    assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
}

/// **VALUE**: The delay before attempt k is `base * (k - 1)`.
///
/// **BUG THIS CATCHES**: Would catch an exponential schedule or an off-by-one
/// that sleeps before the first attempt or after the last.
#[test]
fn given_linear_backoff_when_iterated_then_delays_grow_linearly_and_stop() {
    let mut backoff = LinearBackoff::new(Duration::from_millis(500), 4);

    assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(500)));
    assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(1000)));
    assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(1500)));
    assert_eq!(backoff.next_backoff(), None);

    backoff.reset();
    assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(500)));
}

/// **VALUE**: A call that keeps timing out is attempted exactly `max_attempts`
/// times and then reported as exhausted with the last cause attached.
///
/// **WHY THIS MATTERS**: Total wall time with defaults is 1s + 2s of backoff
/// on top of the attempts; an unbounded loop would hang the UI forever.
///
/// **BUG THIS CATCHES**: Would catch retry counts of 2 or 4, a missing last
/// cause, or sleeping after the final attempt.
#[tokio::test(start_paused = true)]
async fn given_transient_failures_when_executed_then_retries_then_exhausts() {
    // GIVEN: An attempt that always times out
    let policy = RetryPolicy::default();
    let calls = counter();
    let start = Instant::now();

    // WHEN: Executing under the default policy
    let calls_in = Arc::clone(&calls);
    let result: Result<(), ApiError> = policy
        .execute(&CancellationToken::new(), move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::timeout("deadline elapsed")) }
        })
        .await;

    // THEN: Three attempts, three seconds of backoff, exhausted with the timeout as cause
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(3));

    let error = result.unwrap_err();
    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(error.last_cause().error_category(), "timeout");
}

#[tokio::test(start_paused = true)]
async fn given_failure_then_success_when_executed_then_returns_value() {
    let policy = RetryPolicy::new(3, Duration::from_millis(100));
    let calls = counter();

    let calls_in = Arc::clone(&calls);
    let result = policy
        .execute(&CancellationToken::new(), move |attempt| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(ApiError::transport("connection refused"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **VALUE**: HTTP rejections are answers, not transient failures.
///
/// **BUG THIS CATCHES**: Would catch a 401 being retried three times, which
/// triples latency and can trip server-side rate limiting.
#[tokio::test(start_paused = true)]
async fn given_http_error_when_executed_then_not_retried() {
    let policy = RetryPolicy::default();
    let calls = counter();

    let calls_in = Arc::clone(&calls);
    let result: Result<(), ApiError> = policy
        .execute(&CancellationToken::new(), move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::http(401, r#"{"errorCode":"insufficient_scope"}"#)) }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.unwrap_err().is_insufficient_scope());
}

#[tokio::test(start_paused = true)]
async fn given_single_attempt_policy_when_transient_failure_then_exhausted_after_one() {
    let policy = RetryPolicy::new(1, Duration::from_secs(1));
    let calls = counter();
    let start = Instant::now();

    let calls_in = Arc::clone(&calls);
    let result: Result<(), ApiError> = policy
        .execute(&CancellationToken::new(), move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::transport("refused")) }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(matches!(
        result.unwrap_err(),
        ApiError::RetriesExhausted { attempts: 1, .. }
    ));
}

/// **VALUE**: Cancelling during the backoff sleep ends the call immediately.
///
/// **WHY THIS MATTERS**: With a 10s base delay a user pressing Cancel must not
/// wait out the sleep.
///
/// **BUG THIS CATCHES**: Would catch a plain `sleep` that ignores the token,
/// or a cancelled call reported as exhausted instead of cancelled.
#[tokio::test(start_paused = true)]
async fn given_cancel_during_backoff_when_executed_then_returns_cancelled_promptly() {
    // GIVEN: A long backoff and a token cancelled half a second in
    let policy = RetryPolicy::new(3, Duration::from_secs(10));
    let cancel = CancellationToken::new();
    let calls = counter();
    let start = Instant::now();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    // WHEN: Executing an always-failing attempt
    let calls_in = Arc::clone(&calls);
    let result: Result<(), ApiError> = policy
        .execute(&cancel, move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::transport("refused")) }
        })
        .await;

    // THEN: Cancelled after one attempt, well before the first retry
    assert!(result.unwrap_err().is_cancelled());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn given_already_cancelled_token_when_executed_then_attempt_never_runs() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let calls = counter();

    let calls_in = Arc::clone(&calls);
    let result: Result<(), ApiError> = RetryPolicy::default()
        .execute(&cancel, move |_| {
            let calls_in = Arc::clone(&calls_in);
            async move {
                calls_in.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

    assert!(result.unwrap_err().is_cancelled());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
