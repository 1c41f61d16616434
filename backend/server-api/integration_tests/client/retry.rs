use crate::helpers::{
    client_builder_for, client_for_port, client_for_refused_port, spawn_truncating_server,
};

use server_api::{ApiError, RetryPolicy};

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A server slower than the per-attempt deadline is tried exactly
/// `max_attempts` times.
///
/// **BUG THIS CATCHES**: Would catch timeouts being classified as
/// non-retryable, or the retry count drifting.
#[tokio::test]
async fn given_slow_server_when_called_then_times_out_each_attempt_and_exhausts() {
    // GIVEN: Replies slower than a 200ms timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(2)))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_builder_for(&server)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    // WHEN: Calling
    let error = client.verify_authentication_token().await.unwrap_err();

    // THEN: Exhausted after three timeouts
    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(error.last_cause().error_category(), "timeout");
}

#[tokio::test]
async fn given_refused_connection_when_called_then_transport_error_exhausts() {
    let client = client_for_refused_port(RetryPolicy::new(2, Duration::from_millis(10)));

    let error = client.health_check("").await.unwrap_err();

    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 2, .. }));
    assert_eq!(error.last_cause().error_category(), "transport");
}

/// **VALUE**: Cancellation during a long backoff returns immediately.
///
/// **BUG THIS CATCHES**: Would catch the call sleeping out its 10s backoff
/// after the user cancelled.
#[tokio::test]
async fn given_refused_connection_when_cancelled_during_backoff_then_cancelled_promptly() {
    let client = client_for_refused_port(RetryPolicy::new(3, Duration::from_secs(10)));
    let token = CancellationToken::new();
    let view = client.with_cancellation(token.clone());
    let start = Instant::now();

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let error = view.health_check("").await.unwrap_err();

    assert!(error.is_cancelled());
    assert!(start.elapsed() < Duration::from_secs(5));
}

/// **VALUE**: A 2xx reply whose body is cut off mid-stream is treated like
/// any other dropped connection and retried.
///
/// **WHY THIS MATTERS**: Save downloads are large; a connection reset halfway
/// through is the most likely network failure a caller will actually see.
///
/// **BUG THIS CATCHES**: Would catch body-read failures falling through to
/// `Unexpected`, which ends the call after the first attempt.
#[tokio::test]
async fn given_truncated_success_body_when_called_then_retried_as_transport_failure() {
    // GIVEN: A server that promises 100 bytes and sends 4
    let (port, accepted) = spawn_truncating_server("HTTP/1.1 200 OK", "{\"da");
    let client = client_for_port(port, RetryPolicy::new(3, Duration::from_millis(10)));

    // WHEN: Calling
    let error = client.health_check("").await.unwrap_err();

    // THEN: Every attempt was made and the cause is a transport failure
    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(error.last_cause().error_category(), "transport");
    assert!(error.last_cause().to_string().contains("response body interrupted"));
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

/// **VALUE**: An HTTP rejection whose body cannot be read still reports the
/// status, and says the body was lost instead of pretending it was empty.
///
/// **BUG THIS CATCHES**: Would catch the read failure being swallowed into an
/// empty body, or the rejection being retried.
#[tokio::test]
async fn given_rejection_with_truncated_body_when_called_then_status_kept_and_body_marked_unreadable() {
    // GIVEN: A 401 whose body stops short
    let (port, accepted) = spawn_truncating_server("HTTP/1.1 401 Unauthorized", "ins");
    let client = client_for_port(port, RetryPolicy::new(3, Duration::from_millis(10)));

    // WHEN: Calling
    let error = client.health_check("").await.unwrap_err();

    // THEN: Single attempt, status intact, body flagged
    assert_eq!(error.status_code(), Some(401));
    match error {
        ApiError::Http { body, .. } => assert!(body.starts_with("<unreadable body:"), "{body}"),
        other => panic!("expected Http, got {other:?}"),
    }
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}
