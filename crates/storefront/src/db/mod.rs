//! Database operations for the storefront SQLite database.
//!
//! # Tables
//!
//! - `users` - Login names and plain-text passwords
//! - `products` - Coffee catalog (unique names)
//! - `sessions` - Append-only log of issued login tokens
//! - `cart_items` - One row per (user, product) in an in-progress order
//! - `transactions` - Completed checkouts
//! - `line_items` - Products and quantities of each transaction
//! - `tower_sessions` - Cookie session storage (managed by tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded at
//! compile time, and run on startup or via:
//! ```bash
//! cargo run -p cafego-cli -- migrate
//! ```

pub mod cart;
pub mod products;
pub mod seed;
pub mod sessions;
pub mod transactions;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;
use tower_sessions_sqlx_store::SqliteStore;

use cafego_core::UsernameError;

pub use cart::CartRepository;
pub use products::ProductRepository;
pub use seed::{SeedSummary, seed_demo_data};
pub use sessions::{SessionRepository, generate_session_token};
pub use transactions::TransactionRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A username supplied to a repository call is invalid.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_unique_violation(e: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a SQLite connection pool for a file-backed database.
///
/// The database file is created if missing. Foreign keys are enforced and
/// the journal runs in WAL mode so page reads don't block the writer.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a private in-memory database pool.
///
/// An in-memory SQLite database lives only as long as its connection, so the
/// pool holds exactly one connection that never expires.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be opened.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create all tables if they don't exist yet.
///
/// Runs the embedded migrations and the cookie session store's own schema.
/// Safe to call on every startup.
///
/// # Errors
///
/// Returns `RepositoryError` if any statement fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    SqliteStore::new(pool.clone()).migrate().await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

/// Format a timestamp as fixed-width RFC 3339 UTC text.
///
/// Every stored timestamp has the same width, so ordering by the text
/// column is chronological.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use super::{create_memory_pool, run_migrations};

    /// Fresh in-memory database with the full schema.
    #[allow(clippy::expect_used)]
    pub async fn migrated_pool() -> SqlitePool {
        let pool = create_memory_pool()
            .await
            .expect("failed to open in-memory database");
        run_migrations(&pool)
            .await
            .expect("failed to run migrations");
        pool
    }
}
