//! Seed the database with the demo catalog and demo user.

use cafego_storefront::db;

use super::{CommandError, connect};

/// Insert demo data where missing.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let summary = db::seed_demo_data(&pool).await?;
    pool.close().await;

    tracing::info!("Seeding complete!");
    tracing::info!("  Products inserted: {}", summary.products_inserted);
    tracing::info!("  Demo user created: {}", summary.user_created);

    Ok(())
}
