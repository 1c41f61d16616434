use crate::helpers::client_for;

use models::{
    API_PATH, Acknowledged, ApiFunction, ApplyServerOptionsRequest, CreateNewGameRequest,
    HealthCheckResponse, NewGameData, NoData, RunCommandRequest, SettingsMap,
};

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// **VALUE**: The full pipeline works: envelope out, `data` unwrapped back.
///
/// **BUG THIS CATCHES**: Would catch a wrong path, a missing JSON content
/// type, or the `data` field not being unwrapped.
#[tokio::test]
async fn given_healthy_server_when_health_check_called_then_returns_payload() {
    // GIVEN: A server answering HealthCheck
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "function": "HealthCheck",
            "data": {"clientCustomData": ""}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"health": "healthy", "serverCustomData": ""}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Calling health_check
    let response = client_for(&server).health_check("").await.unwrap();

    // THEN: Payload decoded
    assert!(response.is_healthy());
}

/// Replies with whatever `data` the request carried.
struct EchoData;

impl Respond for EchoData {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match serde_json::from_slice::<Value>(&request.body) {
            Ok(envelope) => {
                ResponseTemplate::new(200).set_body_json(json!({"data": envelope["data"]}))
            }
            Err(_) => ResponseTemplate::new(400),
        }
    }
}

async fn assert_echo_round_trip<T>(function: ApiFunction, sent: T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_partial_json(json!({"function": function.as_str()})))
        .respond_with(EchoData)
        .expect(1)
        .mount(&server)
        .await;

    let received: T = client_for(&server).call(function, &sent).await.unwrap();

    assert_eq!(received, sent, "{function:?} did not survive the round trip");
}

/// **VALUE**: Whatever a request carries in `data` decodes back to the same
/// value, across nested structs, settings maps, non-ASCII text and empty
/// payloads.
///
/// **WHY THIS MATTERS**: Request and reply share the envelope codec; a field
/// renamed on one side only would silently drop settings or game options.
///
/// **BUG THIS CATCHES**: Would catch a wrong `function` name on the wire, a
/// camelCase rename applied in one direction only, or unicode being mangled.
#[tokio::test]
async fn given_echo_server_when_generic_call_made_then_data_round_trips() {
    let mut game_settings = SettingsMap::new();
    game_settings.insert("FG.GameRules.NoPower".to_string(), "True".to_string());
    game_settings.insert("FG.PlayerRules.GodMode".to_string(), "False".to_string());

    assert_echo_round_trip(
        ApiFunction::CreateNewGame,
        CreateNewGameRequest {
            new_game_data: NewGameData {
                session_name: "Fábrica 工場 🚀".to_string(),
                map_name: Some("Persistent_Level".to_string()),
                starting_location: Some("Grass Fields".to_string()),
                skip_onboarding: true,
                advanced_game_settings: game_settings,
                custom_options_only_for_modding: SettingsMap::new(),
            },
        },
    )
    .await;

    let mut server_options = SettingsMap::new();
    server_options.insert("FG.DSAutoPause".to_string(), "True".to_string());
    server_options.insert("FG.AutosaveInterval".to_string(), "300".to_string());
    assert_echo_round_trip(
        ApiFunction::ApplyServerOptions,
        ApplyServerOptionsRequest {
            updated_server_options: server_options,
        },
    )
    .await;

    assert_echo_round_trip(
        ApiFunction::RunCommand,
        RunCommandRequest {
            command: "say \"héllo\" 工場 🚀".to_string(),
        },
    )
    .await;

    assert_echo_round_trip(ApiFunction::QueryServerState, NoData::default()).await;
}

/// **VALUE**: 204 No Content is success for acknowledgement-only functions.
///
/// **BUG THIS CATCHES**: Would catch an empty body being reported as a decode failure.
#[tokio::test]
async fn given_no_content_reply_when_acknowledged_expected_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result: Result<Acknowledged, _> = client_for(&server)
        .call(ApiFunction::VerifyAuthenticationToken, &())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_unwrapped_reply_when_decoded_then_whole_body_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"health": "slow"})))
        .mount(&server)
        .await;

    let response: HealthCheckResponse = client_for(&server)
        .call(ApiFunction::HealthCheck, &())
        .await
        .unwrap();

    assert_eq!(response.health, "slow");
}

/// **VALUE**: A malformed 2xx reply fails once with a decode error.
///
/// **BUG THIS CATCHES**: Would catch decode errors being retried.
#[tokio::test]
async fn given_malformed_reply_when_called_then_decode_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).health_check("").await.unwrap_err();

    assert_eq!(error.error_category(), "decode");
}

/// **VALUE**: Rejections surface the status and body, and are not retried.
///
/// **WHY THIS MATTERS**: Callers show "log in as administrator" hints from
/// the insufficient-scope marker.
///
/// **BUG THIS CATCHES**: Would catch a 401/403 being retried or its body lost.
#[tokio::test]
async fn given_insufficient_scope_rejection_when_called_then_http_error_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorCode": "insufficient_scope",
            "errorMessage": "Administrator privilege required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).shutdown().await.unwrap_err();

    assert!(error.is_insufficient_scope());
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.server_error_code().as_deref(), Some("insufficient_scope"));
}

#[tokio::test]
async fn given_server_error_when_called_then_http_error_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).query_server_state().await.unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn given_plain_insufficient_scope_body_when_called_then_message_keeps_it_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("insufficient_scope"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).save_game("Main").await.unwrap_err();

    assert!(error.to_string().contains("insufficient_scope"));
    assert!(error.is_insufficient_scope());
    assert_eq!(error.server_error_code(), None);
}
