//! Product catalog repository.

use sqlx::SqlitePool;
use tracing::debug;

use cafego_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, description
            FROM products
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, description
            FROM products
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product with the same name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        description: &str,
    ) -> Result<Product, RepositoryError> {
        debug!(name, price = %price, "Creating product");

        sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (name, price, description)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, price, description
            ",
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "product name already exists"))
    }

    /// Number of products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let pool = migrated_pool().await;
        let repo = ProductRepository::new(&pool);

        repo.create("Macchiato", Price::from_cents(120), "Espresso with a dash of milk")
            .await
            .unwrap();
        repo.create("Americano", Price::from_cents(100), "Hot brewed coffee")
            .await
            .unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Americano", "Macchiato"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = migrated_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo
            .create("Espresso", Price::from_cents(90), "Strong black coffee")
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.price.to_string(), "$0.90");

        assert!(repo.get_by_id(ProductId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let pool = migrated_pool().await;
        let repo = ProductRepository::new(&pool);

        repo.create("Americano", Price::from_cents(100), "").await.unwrap();
        let err = repo
            .create("Americano", Price::from_cents(150), "")
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
