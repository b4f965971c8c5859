//! Demo data for a fresh database.

use sqlx::SqlitePool;
use tracing::info;

use cafego_core::{Price, Username};

use super::{ProductRepository, RepositoryError, UserRepository};

/// Demo catalog: name, price in cents, description.
const DEMO_PRODUCTS: &[(&str, i64, &str)] = &[
    ("Americano", 100, "Hot brewed coffee"),
    ("Cappuccino", 110, "Espresso with milk foam"),
    ("Espresso", 90, "Strong black coffee"),
    ("Macchiato", 120, "Espresso with a dash of milk"),
];

const DEMO_USERNAME: &str = "melinoe";
const DEMO_PASSWORD: &str = "1234";

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Number of products inserted (zero if the catalog was non-empty).
    pub products_inserted: usize,
    /// Whether the demo user was created.
    pub user_created: bool,
}

/// Insert the demo catalog and demo user where missing.
///
/// Products are only inserted into an empty catalog. The demo user is only
/// created if no user has that name. Running this twice changes nothing the
/// second time.
///
/// # Errors
///
/// Returns `RepositoryError` if any query fails.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<SeedSummary, RepositoryError> {
    let mut summary = SeedSummary::default();

    let products = ProductRepository::new(pool);
    if products.count().await? == 0 {
        for &(name, cents, description) in DEMO_PRODUCTS {
            products
                .create(name, Price::from_cents(cents), description)
                .await?;
            summary.products_inserted += 1;
        }
    }

    let users = UserRepository::new(pool);
    if users.get_by_username(DEMO_USERNAME).await?.is_none() {
        users
            .create(&Username::parse(DEMO_USERNAME)?, DEMO_PASSWORD)
            .await?;
        summary.user_created = true;
    }

    info!(
        products_inserted = summary.products_inserted,
        user_created = summary.user_created,
        "Demo data seeded"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;

    #[tokio::test]
    async fn test_seed_fresh_database() {
        let pool = migrated_pool().await;

        let summary = seed_demo_data(&pool).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                products_inserted: 4,
                user_created: true,
            }
        );

        let catalog: Vec<(String, String)> = ProductRepository::new(&pool)
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| (p.name, p.price.to_string()))
            .collect();
        assert_eq!(
            catalog,
            vec![
                ("Americano".to_string(), "$1.00".to_string()),
                ("Cappuccino".to_string(), "$1.10".to_string()),
                ("Espresso".to_string(), "$0.90".to_string()),
                ("Macchiato".to_string(), "$1.20".to_string()),
            ]
        );

        let user = UserRepository::new(&pool)
            .verify_credentials("melinoe", "1234")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = migrated_pool().await;

        seed_demo_data(&pool).await.unwrap();
        let second = seed_demo_data(&pool).await.unwrap();

        assert_eq!(second, SeedSummary::default());
        assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 4);
        assert_eq!(UserRepository::new(&pool).list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_leaves_existing_catalog_alone() {
        let pool = migrated_pool().await;
        ProductRepository::new(&pool)
            .create("Flat White", Price::from_cents(130), "Velvety milk")
            .await
            .unwrap();

        let summary = seed_demo_data(&pool).await.unwrap();

        assert_eq!(summary.products_inserted, 0);
        assert!(summary.user_created);
        assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 1);
    }
}
