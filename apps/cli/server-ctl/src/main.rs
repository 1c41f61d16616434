use server_ctl::cli::Cli;
use server_ctl::commands;
use server_ctl::error::CtlError;
use server_ctl::logger::initialize as LoggerInitialize;

use server_api::config::{default_config_dir, load_dotenv};
use server_api::{ApiClient, ClientConfig};

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

const INSUFFICIENT_SCOPE_HINT: &str =
    "hint: this command needs more privilege; pass the admin --password or an application --token";

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing so .env values feed the env-backed arguments.
    let dotenv_path = load_dotenv();
    let cli = Cli::parse();

    match run(cli, dotenv_path.is_some()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if e.is_insufficient_scope() {
                eprintln!("{INSUFFICIENT_SCOPE_HINT}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, dotenv_loaded: bool) -> Result<(), CtlError> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };

    create_dir_all(&config_dir).map_err(|e| {
        CtlError::ctl(format!(
            "Failed to create config directory {}: {e}",
            config_dir.display()
        ))
    })?;

    LoggerInitialize(&config_dir, cli.log_level())?;

    info!("server-ctl {} starting", env!("CARGO_PKG_VERSION"));
    if dotenv_loaded {
        info!("Environment loaded from .env");
    }

    let mut config = ClientConfig::load(&config_dir)?;
    config.apply_env_overrides()?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let client = ApiClient::from_config(&config)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling call");
            ctrl_c.cancel();
        }
    });

    let view = client.with_cancellation(cancel);
    let result = commands::execute(&view, cli.command, cli.password.as_deref()).await;
    client.dispose();

    let output = result?;
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| CtlError::ctl(format!("Failed to render result: {e}")))?;
    println!("{rendered}");

    Ok(())
}
