//! Command-line arguments.

use server_api::ClientConfig;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::logger::DEFAULT_LOG_LEVEL;

pub const ADMIN_PASSWORD_ENV: &str = "SERVER_ADMIN_PASSWORD";

#[derive(Debug, Parser)]
#[command(name = "server-ctl", version)]
#[command(about = "Manage a dedicated game server through its HTTPS API")]
pub struct Cli {
    /// Directory holding client.json and server-ctl.log
    #[arg(long, env = "SERVER_CTL_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Server host (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Server API port (overrides config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Application token generated on the server console
    #[arg(long, env = server_api::config::APPLICATION_TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Password used when a command needs to log in
    #[arg(long, env = ADMIN_PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Log every call and retry at trace level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Trace
        } else {
            DEFAULT_LOG_LEVEL
        }
    }

    /// Command-line values win over both the file and the environment.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(host) = &self.host {
            config.connection.host = host.clone();
        }
        if let Some(port) = self.port {
            config.connection.port = port;
        }
        if let Some(token) = &self.token {
            config.connection.application_token = Some(token.clone());
        }
    }
}

/// `Debug` output includes passwords; log [`Command::name`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check that the server is up
    Health {
        #[arg(long, default_value = "")]
        custom_data: String,
    },
    /// Log in and report the privilege obtained
    Login,
    /// Check that the current credential is accepted
    Verify,
    /// Show the running game state
    State,
    /// Run a console command
    Run { command: String },
    /// Shut the server down
    Shutdown,
    /// Save the running game
    Save { name: String },
    /// Load a save
    Load {
        name: String,
        #[arg(long)]
        advanced: bool,
    },
    /// List sessions and their saves
    Sessions,
    /// Show current and pending server options
    Options,
    /// Change one server option
    SetOption { key: String, value: String },
    /// Show advanced game settings
    AdvancedSettings,
    /// Rename the server
    Rename { name: String },
    /// Claim an unclaimed server
    Claim {
        name: String,
        admin_password: String,
    },
    /// Set or clear the client password
    SetClientPassword { password: String },
    /// Change the admin password
    SetAdminPassword { password: String },
    /// Choose the session loaded on server start
    AutoLoad { session: String },
    /// Start a new game
    NewGame {
        session: String,
        #[arg(long)]
        map: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        skip_onboarding: bool,
    },
    /// Delete a save file
    DeleteSave { name: String },
    /// Delete every save of a session
    DeleteSession { name: String },
    /// Upload a save file
    Upload {
        file: PathBuf,
        /// Save name on the server; defaults to the file stem
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        load: bool,
        #[arg(long)]
        advanced: bool,
    },
    /// Download a save file
    Download { name: String, file: PathBuf },
}

impl Command {
    /// Commands that need a credential log in first.
    pub fn requires_login(&self) -> bool {
        !matches!(
            self,
            Command::Health { .. } | Command::Login | Command::Claim { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Health { .. } => "health",
            Command::Login => "login",
            Command::Verify => "verify",
            Command::State => "state",
            Command::Run { .. } => "run",
            Command::Shutdown => "shutdown",
            Command::Save { .. } => "save",
            Command::Load { .. } => "load",
            Command::Sessions => "sessions",
            Command::Options => "options",
            Command::SetOption { .. } => "set-option",
            Command::AdvancedSettings => "advanced-settings",
            Command::Rename { .. } => "rename",
            Command::Claim { .. } => "claim",
            Command::SetClientPassword { .. } => "set-client-password",
            Command::SetAdminPassword { .. } => "set-admin-password",
            Command::AutoLoad { .. } => "auto-load",
            Command::NewGame { .. } => "new-game",
            Command::DeleteSave { .. } => "delete-save",
            Command::DeleteSession { .. } => "delete-session",
            Command::Upload { .. } => "upload",
            Command::Download { .. } => "download",
        }
    }
}
