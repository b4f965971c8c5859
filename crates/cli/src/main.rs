//! CafeGo CLI - database setup and user management.
//!
//! # Usage
//!
//! ```bash
//! # Create missing tables
//! cafego-cli migrate
//!
//! # Insert the demo catalog and demo user where missing
//! cafego-cli seed
//!
//! # Create a user
//! cafego-cli user create -u melinoe -p 1234
//!
//! # List users
//! cafego-cli user list
//! ```
//!
//! All commands read the database location from `CAFEGO_DATABASE_URL`
//! (falling back to `DATABASE_URL`, then `sqlite://cafego.db`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cafego-cli")]
#[command(author, version, about = "CafeGo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing database tables
    Migrate,
    /// Seed the demo catalog and demo user
    Seed,
    /// Manage storefront users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Plain-text password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&username, &password).await?;
            }
            UserAction::List => commands::user::list().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "cafego-cli",
            "user",
            "create",
            "-u",
            "melinoe",
            "-p",
            "1234",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::User {
                action: UserAction::Create { .. }
            })
        ));
    }
}
