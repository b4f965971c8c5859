//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::SqlitePool;
use thiserror::Error;

use cafego_core::UsernameError;
use cafego_storefront::config::{ConfigError, StorefrontConfig};
use cafego_storefront::db::{self, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Username failed validation.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),
}

/// Open the configured database and make sure the schema exists.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    Ok(pool)
}
