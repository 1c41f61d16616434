use crate::helpers::{APP_TOKEN, SESSION_TOKEN, client_builder_for, client_for};

use models::PrivilegeLevel;
use server_api::{Credential, LoginOutcome};

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_reply(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {"authenticationToken": token}}))
}

/// **VALUE**: The application token is sent even after a login stores a session token.
///
/// **BUG THIS CATCHES**: Would catch the session token overwriting the header
/// and the call running with lower privilege than configured.
#[tokio::test]
async fn given_both_tokens_when_called_then_application_token_in_header() {
    // GIVEN: A client with an application token and a session token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", format!("Bearer {APP_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_builder_for(&server)
        .application_token(APP_TOKEN)
        .build()
        .unwrap();
    client.set_session_token(Some(SESSION_TOKEN.to_string()));

    // WHEN: Any call is made
    let result = client.verify_authentication_token().await;

    // THEN: The application token header matched
    assert!(result.is_ok(), "unexpected: {result:?}");
}

#[tokio::test]
async fn given_application_token_when_login_then_skipped_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_builder_for(&server)
        .application_token(APP_TOKEN)
        .build()
        .unwrap();

    let outcome = client.login(Some("pw")).await.unwrap();

    assert_eq!(outcome, LoginOutcome::ApplicationToken);
}

/// **VALUE**: Login tries Administrator first and falls back to Client.
///
/// **WHY THIS MATTERS**: Players who only know the client password must
/// still be able to connect.
///
/// **BUG THIS CATCHES**: Would catch the fallback being skipped, or the
/// resulting token not being used by later calls.
#[tokio::test]
async fn given_client_password_when_login_then_falls_back_to_client_privilege() {
    // GIVEN: Administrator login rejected, Client login accepted
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "function": "PasswordLogin",
            "data": {"minimumPrivilegeLevel": "Administrator", "password": "client-pw"}
        })))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"errorCode": "wrong_password"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "function": "PasswordLogin",
            "data": {"minimumPrivilegeLevel": "Client"}
        })))
        .respond_with(token_reply(SESSION_TOKEN))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "VerifyAuthenticationToken"})))
        .and(header("authorization", format!("Bearer {SESSION_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    // WHEN: Logging in with the client password
    let outcome = client.login(Some("client-pw")).await.unwrap();

    // THEN: Client privilege, and the session token is used afterwards
    assert_eq!(
        outcome,
        LoginOutcome::Session {
            privilege: PrivilegeLevel::Client
        }
    );
    assert!(matches!(client.credential(), Credential::SessionToken(_)));
    client.verify_authentication_token().await.unwrap();
}

#[tokio::test]
async fn given_no_password_when_login_then_passwordless_administrator_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "function": "PasswordlessLogin",
            "data": {"minimumPrivilegeLevel": "Administrator"}
        })))
        .respond_with(token_reply("initial-admin"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.login(None).await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Session {
            privilege: PrivilegeLevel::Administrator
        }
    );
}

#[tokio::test]
async fn given_both_logins_rejected_when_login_then_client_error_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("wrong_password"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.login(Some("nope")).await.unwrap_err();

    assert_eq!(error.status_code(), Some(401));
    assert!(client.credential().is_none());
}

#[tokio::test]
async fn given_empty_token_in_reply_when_login_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(token_reply(""))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.login(None).await.unwrap_err();

    assert_eq!(error.error_category(), "decode");
    assert!(client.credential().is_none());
}

/// **VALUE**: Claiming a server yields the admin token for later calls.
#[tokio::test]
async fn given_unclaimed_server_when_claimed_then_token_becomes_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "function": "ClaimServer",
            "data": {"serverName": "My Factory", "adminPassword": "admin-pw"}
        })))
        .respond_with(token_reply("claimed-admin"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.claim_server("My Factory", "admin-pw").await.unwrap();

    assert_eq!(
        client.credential().authorization_header().as_deref(),
        Some("Bearer claimed-admin")
    );
}

#[tokio::test]
async fn given_credentials_when_disconnected_then_calls_are_anonymous() {
    let server = MockServer::start().await;
    let client = client_builder_for(&server)
        .application_token(APP_TOKEN)
        .build()
        .unwrap();
    client.set_session_token(Some(SESSION_TOKEN.to_string()));

    client.disconnect();

    assert!(client.credential().is_none());
    assert!(!client.has_application_token());
}
