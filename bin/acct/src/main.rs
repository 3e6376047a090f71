//! `acct` — CLI client for the account service.
//!
//! A thin driver over the form controllers and session state: field
//! errors print to stderr, data prints as pretty JSON to stdout, and all
//! business rules stay in the libraries.

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use account_client::{FileStore, HttpGateway, Session};
use anyhow::Result;
use clap::{Parser, Subcommand};

use config::ClientConfig;

/// Account service CLI client.
#[derive(Parser, Debug)]
#[command(name = "acct", about = "Account service CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.acct/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new account (prompts for a password).
    Signup {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Email address.
        #[arg(long)]
        email: String,
    },

    /// Sign in and store the session token.
    Login {
        /// Email address.
        #[arg(long)]
        email: String,
    },

    /// Clear the stored session. Local only, never calls the server.
    Logout,

    /// Fetch and print the signed-in profile.
    Profile,

    /// Edit the signed-in profile.
    Edit {
        /// New full name.
        #[arg(long)]
        name: Option<String>,
        /// New email address.
        #[arg(long)]
        email: Option<String>,
        /// Change the password (prompts for current + new).
        #[arg(long = "change-password")]
        change_password: bool,
    },

    /// Delete the signed-in account.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// List all users.
    Users,

    /// Show or update the client configuration.
    Config {
        /// Set the account service base URL.
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let mut config = ClientConfig::load(&config_path)?;

    // Config management needs no session; handle it before building one.
    if let Commands::Config { server } = &cli.command {
        match server {
            Some(server) => {
                config.server = server.clone();
                config.save(&config_path)?;
                println!("Server set to {}.", config.server);
            }
            None => print!("{}", toml::to_string_pretty(&config)?),
        }
        return Ok(());
    }

    let gateway = Arc::new(HttpGateway::new(config.server.as_str())?);
    let store = Arc::new(FileStore::new(ClientConfig::home_dir()));
    let session = Arc::new(Session::new(gateway, store));

    match cli.command {
        Commands::Signup { name, email } => commands::auth::signup(session, &name, &email).await,
        Commands::Login { email } => commands::auth::login(session, &email).await,
        Commands::Logout => commands::auth::logout(&session),
        Commands::Profile => commands::profile::show(session).await,
        Commands::Edit {
            name,
            email,
            change_password,
        } => commands::profile::edit(session, name, email, change_password).await,
        Commands::Delete { yes } => commands::profile::delete(session, yes).await,
        Commands::Users => commands::profile::users(session).await,
        // Handled before the session was built.
        Commands::Config { .. } => Ok(()),
    }
}
