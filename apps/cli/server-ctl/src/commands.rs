//! One handler per subcommand. Each returns the JSON printed on stdout.

use crate::cli::Command;
use crate::error::CtlError;

use models::{Acknowledged, NewGameData, PrivilegeLevel, SettingsMap, UploadSaveGameRequest};
use server_api::{ApiClient, Credential, LoginOutcome};

use std::path::Path;

use log::{debug, info};
use serde::Serialize;
use serde_json::{Value, json};

const STATUS_OK: &str = "ok";

/// Run `command` against `client`, logging in first when the command needs it.
pub async fn execute(
    client: &ApiClient,
    command: Command,
    password: Option<&str>,
) -> Result<Value, CtlError> {
    if command.requires_login() {
        client.login(password).await?;
    }

    debug!("Executing {}", command.name());

    match command {
        Command::Health { custom_data } => to_json(&client.health_check(&custom_data).await?),
        Command::Login => login(client, password).await,
        Command::Verify => {
            client.verify_authentication_token().await?;
            Ok(json!({"status": STATUS_OK, "credential": client.credential().kind()}))
        }
        Command::State => to_json(&client.query_server_state().await?),
        Command::Run { command } => to_json(&client.run_command(&command).await?),
        Command::Shutdown => acknowledged(client.shutdown().await?),
        Command::Save { name } => acknowledged(client.save_game(&name).await?),
        Command::Load { name, advanced } => {
            acknowledged(client.load_game(&name, advanced).await?)
        }
        Command::Sessions => to_json(&client.enumerate_sessions().await?),
        Command::Options => to_json(&client.get_server_options().await?),
        Command::SetOption { key, value } => {
            let mut options = SettingsMap::new();
            options.insert(key, value);
            acknowledged(client.apply_server_options(options).await?)
        }
        Command::AdvancedSettings => to_json(&client.get_advanced_game_settings().await?),
        Command::Rename { name } => acknowledged(client.rename_server(&name).await?),
        Command::Claim {
            name,
            admin_password,
        } => claim(client, &name, &admin_password).await,
        Command::SetClientPassword { password } => {
            acknowledged(client.set_client_password(&password).await?)
        }
        Command::SetAdminPassword { password } => set_admin_password(client, &password).await,
        Command::AutoLoad { session } => {
            acknowledged(client.set_auto_load_session_name(&session).await?)
        }
        Command::NewGame {
            session,
            map,
            location,
            skip_onboarding,
        } => {
            let data = NewGameData {
                session_name: session,
                map_name: map,
                starting_location: location,
                skip_onboarding,
                ..Default::default()
            };
            acknowledged(client.create_new_game(data).await?)
        }
        Command::DeleteSave { name } => acknowledged(client.delete_save_file(&name).await?),
        Command::DeleteSession { name } => {
            acknowledged(client.delete_save_session(&name).await?)
        }
        Command::Upload {
            file,
            name,
            load,
            advanced,
        } => upload(client, &file, name, load, advanced).await,
        Command::Download { name, file } => download(client, &name, &file).await,
    }
}

async fn login(client: &ApiClient, password: Option<&str>) -> Result<Value, CtlError> {
    match client.login(password).await? {
        LoginOutcome::ApplicationToken => Ok(json!({"credential": "application"})),
        LoginOutcome::Session { privilege } => {
            Ok(json!({"credential": "session", "privilege": privilege}))
        }
    }
}

/// An unclaimed server only grants `InitialAdmin`, and only without a password.
async fn claim(client: &ApiClient, name: &str, admin_password: &str) -> Result<Value, CtlError> {
    if !client.has_application_token() {
        let initial = client
            .passwordless_login(PrivilegeLevel::InitialAdmin)
            .await?;
        client.set_session_token(Some(initial.authentication_token));
    }

    client.claim_server(name, admin_password).await?;
    Ok(json!({"status": STATUS_OK, "serverName": name}))
}

/// The current token is passed along so this session survives the change.
async fn set_admin_password(client: &ApiClient, password: &str) -> Result<Value, CtlError> {
    let token = match client.credential() {
        Credential::SessionToken(token) | Credential::ApplicationToken(token) => {
            token.as_str().to_string()
        }
        Credential::None => {
            return Err(CtlError::ctl(
                "set-admin-password needs a credential; pass --password or --token",
            ));
        }
    };

    acknowledged(client.set_admin_password(password, &token).await?)
}

async fn upload(
    client: &ApiClient,
    file: &Path,
    name: Option<String>,
    load: bool,
    advanced: bool,
) -> Result<Value, CtlError> {
    let save_name = match name {
        Some(name) => name,
        None => file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CtlError::ctl(format!("Cannot derive a save name from {}", file.display()))
            })?,
    };

    let bytes = std::fs::read(file)
        .map_err(|e| CtlError::ctl(format!("Failed to read {}: {e}", file.display())))?;

    let request = UploadSaveGameRequest {
        save_name: save_name.clone(),
        load_save_game: load,
        enable_advanced_game_settings: advanced,
    };
    client.upload_save_game(request, bytes).await?;

    Ok(json!({"status": STATUS_OK, "saveName": save_name}))
}

async fn download(client: &ApiClient, name: &str, file: &Path) -> Result<Value, CtlError> {
    let bytes = client.download_save_game(name).await?;

    std::fs::write(file, &bytes)
        .map_err(|e| CtlError::ctl(format!("Failed to write {}: {e}", file.display())))?;

    info!("Wrote {} bytes to {}", bytes.len(), file.display());
    Ok(json!({"status": STATUS_OK, "file": file.display().to_string(), "bytes": bytes.len()}))
}

fn acknowledged(_: Acknowledged) -> Result<Value, CtlError> {
    Ok(json!({"status": STATUS_OK}))
}

#[track_caller]
fn to_json<T: Serialize>(value: &T) -> Result<Value, CtlError> {
    serde_json::to_value(value).map_err(|e| CtlError::ctl(format!("Failed to render result: {e}")))
}
