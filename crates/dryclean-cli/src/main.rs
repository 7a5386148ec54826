mod addresses;
mod auth;
mod catalog;
mod schedule;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dryclean_client::{ApiClient, Notifier, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::addresses::AddressCommands;
use crate::auth::AuthCommands;

#[derive(Debug, Parser)]
#[command(name = "dryclean-cli")]
#[command(about = "Dry-cleaning customer client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and store credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DRYCLEAN_PASSWORD")]
        password: String,
    },
    /// Forget stored credentials and session-local locations
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Account recovery and sign-up
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage saved locations
    Addresses {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// List service categories
    Categories,
    /// List your orders
    Orders,
    /// Show pickup dates for a month
    Calendar {
        /// Months from the current one
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
}

/// Prints toasts to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("ok: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("dryclean-cli: run with --help to see commands");
        return Ok(ExitCode::SUCCESS);
    };
    if let Commands::Calendar { offset } = command {
        schedule::run_calendar(offset)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = dryclean_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let mut session = SessionStore::load(&config.session_path)?;
    let mut client = ApiClient::from_config(&config)?;
    if let Some(creds) = session.credentials() {
        client.set_token(Some(creds.token));
    }

    match command {
        Commands::Login { email, password } => {
            auth::run_login(&client, &mut session, &email, &password).await?;
        }
        Commands::Logout => {
            session.clear();
            session.save()?;
            println!("logged out");
        }
        Commands::Whoami => auth::run_whoami(&session),
        Commands::Auth { command } => auth::run_auth_command(&client, command).await?,
        Commands::Addresses { command } => {
            return addresses::run_address_command(&config, client, &mut session, command).await;
        }
        Commands::Categories => catalog::run_categories(&client).await?,
        Commands::Orders => catalog::run_orders(&client, &session).await?,
        Commands::Calendar { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
