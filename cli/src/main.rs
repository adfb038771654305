//! `fieldops`: command-line client for the FieldOps backend.
//!
//! Signs in, inspects and clears a session kept in a local JSON file, and
//! queries the LINE linking endpoints. Output is JSON on stdout; logs go to
//! stderr and follow `RUST_LOG`.

mod commands;
mod file_storage;
mod transport;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use session::{ApiConfig, ApiError};
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::file_storage::FileStorage;
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not signed in; run `fieldops login` first")]
    NotSignedIn,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fieldops", about = "FieldOps session and LINE linking CLI")]
struct Cli {
    #[arg(long, env = "FIELDOPS_BASE_URL", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    #[arg(long, env = "FIELDOPS_STATE_FILE", default_value = ".fieldops-session.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FIELDOPS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Verify the saved session and print the user.
    Whoami,
    /// Notify the backend and clear the saved session.
    Logout,
    /// Show whether a LINE user is linked to an account.
    LinkStatus { line_user_id: String },
    /// Exchange a LIFF access token for a session.
    LineAuth {
        #[arg(long)]
        liff_token: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = ReqwestTransport::new(reqwest::Client::builder().build()?);
    let storage = Arc::new(FileStorage::open(&cli.state_file));
    tracing::debug!(state_file = %storage.path().display(), base_url = %cli.base_url, "starting");

    let commands = Commands::new(ApiConfig::new(Some(&cli.base_url)), Arc::new(transport), storage);
    let output = run(&commands, cli.command).await?;
    print_json(&output)
}

async fn run(commands: &Commands, command: Command) -> Result<Value, CliError> {
    match command {
        Command::Login { email, password } => commands.login(&email, &password).await,
        Command::Whoami => commands.whoami().await,
        Command::Logout => Ok(commands.logout().await),
        Command::LinkStatus { line_user_id } => commands.link_status(&line_user_id).await,
        Command::LineAuth { liff_token } => commands.line_auth(&liff_token).await,
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
