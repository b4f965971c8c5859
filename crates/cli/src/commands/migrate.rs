//! Database migration command.
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! storefront crate. Every statement is `CREATE ... IF NOT EXISTS`, so running
//! this against an existing database is harmless.

use super::{CommandError, connect};

/// Create any missing tables.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
