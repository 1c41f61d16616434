use server_ctl::cli::Command;
use server_ctl::commands::execute;

use models::{EndpointBuilder, Scheme};
use server_api::{ApiClient, RetryPolicy};

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
    let address = server.address();
    let endpoint = EndpointBuilder::default()
        .with_host(address.ip().to_string())
        .with_port(address.port())
        .with_scheme(Scheme::Http)
        .build()
        .unwrap();

    let mut builder = ApiClient::builder()
        .endpoint(endpoint)
        .retry_policy(RetryPolicy::new(1, Duration::ZERO));
    if let Some(token) = token {
        builder = builder.application_token(token);
    }
    builder.build().unwrap()
}

fn token_reply(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {"authenticationToken": token}}))
}

#[tokio::test]
async fn given_health_command_when_executed_then_no_login_and_payload_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "HealthCheck"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"health": "healthy"}})))
        .expect(1)
        .mount(&server)
        .await;

    let output = execute(
        &client_for(&server, None),
        Command::Health {
            custom_data: String::new(),
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(output["health"], "healthy");
}

/// **VALUE**: Privileged commands log in first and use the session token.
///
/// **BUG THIS CATCHES**: Would catch commands being sent anonymously and
/// failing with insufficient scope.
#[tokio::test]
async fn given_state_command_with_password_when_executed_then_logs_in_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "PasswordLogin"})))
        .respond_with(token_reply("admin-session"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "QueryServerState"})))
        .and(header("authorization", "Bearer admin-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"serverGameState": {"activeSessionName": "Main", "numConnectedPlayers": 3}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = execute(&client_for(&server, None), Command::State, Some("pw"))
        .await
        .unwrap();

    assert_eq!(output["activeSessionName"], "Main");
    assert_eq!(output["numConnectedPlayers"], 3);
}

#[tokio::test]
async fn given_insufficient_scope_when_executed_then_error_flags_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"errorCode": "insufficient_scope"})),
        )
        .mount(&server)
        .await;

    let error = execute(&client_for(&server, Some("client-app-token")), Command::Shutdown, None)
        .await
        .unwrap_err();

    assert!(error.is_insufficient_scope());
}

#[tokio::test]
async fn given_unclaimed_server_when_claim_executed_then_initial_admin_login_then_claim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "function": "PasswordlessLogin",
            "data": {"minimumPrivilegeLevel": "InitialAdmin"}
        })))
        .respond_with(token_reply("initial"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "ClaimServer"})))
        .and(header("authorization", "Bearer initial"))
        .respond_with(token_reply("claimed"))
        .expect(1)
        .mount(&server)
        .await;

    let output = execute(
        &client_for(&server, None),
        Command::Claim {
            name: "Outpost".to_string(),
            admin_password: "secret".to_string(),
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(output["serverName"], "Outpost");
}

#[tokio::test]
async fn given_save_name_when_download_executed_then_file_written() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "DownloadSaveGame"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"SAVEDATA".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("Main.sav");

    let output = execute(
        &client_for(&server, Some("app")),
        Command::Download {
            name: "Main".to_string(),
            file: target.clone(),
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(output["bytes"], 8);
    assert_eq!(std::fs::read(&target).unwrap(), b"SAVEDATA");
}

#[tokio::test]
async fn given_missing_upload_file_when_executed_then_ctl_error_without_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "UploadSaveGame"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let error = execute(
        &client_for(&server, Some("app")),
        Command::Upload {
            file: "/nonexistent/dir/Missing.sav".into(),
            name: None,
            load: false,
            advanced: false,
        },
        None,
    )
    .await
    .unwrap_err();

    assert!(error.to_string().contains("Failed to read"));
}
