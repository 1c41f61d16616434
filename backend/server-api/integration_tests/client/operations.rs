use crate::helpers::client_for;

use models::{NewGameData, SettingsMap, UploadSaveGameRequest};

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, header_regex, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_console_command_when_run_then_result_and_flag_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "function": "RunCommand",
            "data": {"command": "FG.NetworkQuality 3"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"commandResult": "Network quality set", "returnValue": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .run_command("FG.NetworkQuality 3")
        .await
        .unwrap();

    assert_eq!(response.command_result, "Network quality set");
    assert!(response.return_value);
}

#[tokio::test]
async fn given_running_server_when_state_queried_then_inner_state_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "QueryServerState", "data": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"serverGameState": {
                "activeSessionName": "Main",
                "numConnectedPlayers": 2,
                "playerLimit": 4,
                "techTier": 5,
                "isGameRunning": true,
                "averageTickRate": 29.5
            }}
        })))
        .mount(&server)
        .await;

    let state = client_for(&server).query_server_state().await.unwrap();

    assert_eq!(state.active_session_name, "Main");
    assert_eq!(state.num_connected_players, 2);
    assert!(state.is_game_running);
}

#[tokio::test]
async fn given_sessions_when_enumerated_then_current_session_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"function": "EnumerateSessions"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "sessions": [
                    {"sessionName": "Alpha", "saveHeaders": []},
                    {"sessionName": "Beta", "saveHeaders": [{"saveName": "Beta_autosave_0"}]}
                ],
                "currentSessionIndex": 1
            }
        })))
        .mount(&server)
        .await;

    let response = client_for(&server).enumerate_sessions().await.unwrap();

    let current = response.current_session().expect("index 1 exists");
    assert_eq!(current.session_name, "Beta");
    assert_eq!(current.save_headers[0].save_name, "Beta_autosave_0");
}

#[tokio::test]
async fn given_option_changes_when_applied_then_sent_as_string_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "function": "ApplyServerOptions",
            "data": {"updatedServerOptions": {"FG.AutosaveInterval": "600"}}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = SettingsMap::new();
    options.insert("FG.AutosaveInterval".to_string(), "600".to_string());

    client_for(&server)
        .apply_server_options(options)
        .await
        .unwrap();
}

#[tokio::test]
async fn given_new_admin_password_when_set_then_token_sent_in_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "function": "SetAdminPassword",
            "data": {"password": "new-pw", "authenticationToken": "next-token"}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .set_admin_password("new-pw", "next-token")
        .await
        .unwrap();
}

#[tokio::test]
async fn given_new_game_without_map_when_created_then_optional_fields_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "function": "CreateNewGame",
            "data": {"newGameData": {
                "sessionName": "Fresh",
                "skipOnboarding": true,
                "advancedGameSettings": {},
                "customOptionsOnlyForModding": {}
            }}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let data = NewGameData {
        session_name: "Fresh".to_string(),
        skip_onboarding: true,
        ..Default::default()
    };

    client_for(&server).create_new_game(data).await.unwrap();
}

/// **VALUE**: Save uploads travel as multipart with the envelope and the file.
///
/// **BUG THIS CATCHES**: Would catch the upload being sent as JSON, or a
/// renamed part the server does not recognise.
#[tokio::test]
async fn given_save_file_when_uploaded_then_sent_as_multipart_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"data\""))
        .and(body_string_contains("name=\"saveGameFile\""))
        .and(body_string_contains("\"function\":\"UploadSaveGame\""))
        .and(body_string_contains("SAVEBYTES"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let request = UploadSaveGameRequest {
        save_name: "Uploaded".to_string(),
        load_save_game: true,
        enable_advanced_game_settings: false,
    };

    client_for(&server)
        .upload_save_game(request, b"SAVEBYTES".to_vec())
        .await
        .unwrap();
}

#[tokio::test]
async fn given_save_name_when_downloaded_then_raw_bytes_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "function": "DownloadSaveGame",
            "data": {"saveName": "Main_1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xC1, 0x83, 0x2A, 0x9E]))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .download_save_game("Main_1")
        .await
        .unwrap();

    assert_eq!(bytes, vec![0xC1, 0x83, 0x2A, 0x9E]);
}
