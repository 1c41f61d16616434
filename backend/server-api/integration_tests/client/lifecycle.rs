use crate::helpers::client_for;

use std::time::Duration;

use futures_util::future::join_all;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Disposal is final and network-free.
///
/// **BUG THIS CATCHES**: Would catch a disposed client still sending requests,
/// or `dispose` reporting a release more than once.
#[tokio::test]
async fn given_disposed_client_when_called_then_disposed_without_network() {
    // GIVEN: A server that must never be hit
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    // WHEN: Disposing twice, then calling
    let first = client.dispose();
    let second = client.dispose();
    let error = client.verify_authentication_token().await.unwrap_err();

    // THEN: One release, and the call fails as disposed
    assert!(first);
    assert!(!second);
    assert!(client.is_disposed());
    assert!(error.is_disposed());
}

#[tokio::test]
async fn given_clone_when_original_disposed_then_clone_is_disposed_too() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let clone = client.clone();

    client.dispose();

    assert!(clone.is_disposed());
    assert!(clone.health_check("").await.unwrap_err().is_disposed());
}

/// **VALUE**: A call waiting on a slow server ends as soon as the client is disposed.
///
/// **BUG THIS CATCHES**: Would catch in-flight calls hanging until the
/// transport timeout after shutdown.
#[tokio::test]
async fn given_in_flight_call_when_disposed_then_resolves_disposed_promptly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let in_flight = tokio::spawn({
        let client = client.clone();
        async move { client.verify_authentication_token().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.dispose();

    let result = tokio::time::timeout(Duration::from_secs(2), in_flight)
        .await
        .expect("call should end promptly")
        .expect("task should not panic");

    assert!(result.unwrap_err().is_disposed());
}

/// **VALUE**: A cancellation view cancels its own calls and leaves the client usable.
///
/// **BUG THIS CATCHES**: Would catch the external token cancelling the whole
/// client, or a cancelled call reported as a generic failure.
#[tokio::test]
async fn given_cancellation_view_when_token_cancelled_then_call_cancelled_and_client_usable() {
    // GIVEN: A slow QueryServerState and a fast HealthCheck
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "QueryServerState"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"serverGameState": {}}}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "HealthCheck"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"health": "healthy"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = CancellationToken::new();
    let view = client.with_cancellation(token.clone());

    // WHEN: Cancelling while the slow call is in flight
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });
    let error = view.query_server_state().await.unwrap_err();

    // THEN: Cancelled, and the original client still works
    assert!(error.is_cancelled());
    assert!(!client.is_disposed());
    assert!(client.health_check("").await.unwrap().is_healthy());
}

#[tokio::test]
async fn given_clones_when_session_token_set_on_one_then_visible_on_other() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let clone = client.clone();

    client.set_session_token(Some("shared".to_string()));

    assert_eq!(
        clone.credential().authorization_header().as_deref(),
        Some("Bearer shared")
    );
}

/// **VALUE**: Concurrent calls on one client are independent.
///
/// **BUG THIS CATCHES**: Would catch a lock held across an await serializing
/// or deadlocking concurrent calls.
#[tokio::test]
async fn given_many_concurrent_calls_when_awaited_then_all_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"health": "healthy"}}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(10)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let results = join_all((0..10).map(|i| {
        let client = client.clone();
        async move { client.health_check(&format!("call-{i}")).await }
    }))
    .await;

    assert!(results.iter().all(|result| result.is_ok()));
}
