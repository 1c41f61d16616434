use crate::cli::{Cli, Command};

use server_api::ClientConfig;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[test]
fn given_global_flags_when_parsed_then_override_config() {
    let cli = Cli::try_parse_from([
        "server-ctl",
        "--host",
        "10.0.0.9",
        "--port",
        "15000",
        "--token",
        "app",
        "state",
    ])
    .unwrap();
    let mut config = ClientConfig::default();

    cli.apply_overrides(&mut config);

    assert_eq!(cli.command, Command::State);
    assert_eq!(config.connection.host, "10.0.0.9");
    assert_eq!(config.connection.port, 15000);
    assert_eq!(config.connection.application_token.as_deref(), Some("app"));
}

#[test]
fn given_subcommand_arguments_when_parsed_then_fields_populated() {
    let cli = Cli::try_parse_from([
        "server-ctl",
        "upload",
        "saves/Main.sav",
        "--load",
        "--name",
        "Imported",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Command::Upload {
            file: PathBuf::from("saves/Main.sav"),
            name: Some("Imported".to_string()),
            load: true,
            advanced: false,
        }
    );
}

#[test]
fn given_verbose_flag_when_parsed_then_trace_level() {
    let cli = Cli::try_parse_from(["server-ctl", "-v", "health"]).unwrap();

    assert_eq!(cli.log_level(), LevelFilter::Trace);
}

/// **VALUE**: Only health, login and claim skip the automatic login.
///
/// **BUG THIS CATCHES**: Would catch `claim` logging in as Administrator on
/// an unclaimed server, which always fails.
#[test]
fn given_commands_when_checked_then_login_requirement_matches() {
    assert!(!Command::Health {
        custom_data: String::new()
    }
    .requires_login());
    assert!(!Command::Login.requires_login());
    assert!(!Command::Claim {
        name: "n".to_string(),
        admin_password: "p".to_string()
    }
    .requires_login());
    assert!(Command::State.requires_login());
    assert!(Command::Shutdown.requires_login());
}

#[test]
fn given_password_command_when_named_then_no_secret_in_name() {
    let command = Command::SetClientPassword {
        password: "hunter2".to_string(),
    };

    assert_eq!(command.name(), "set-client-password");
}
