//! Cart repository.
//!
//! A user's cart holds at most one row per product. Adding a product that is
//! already in the cart increases that row's quantity, up to `Quantity::MAX`.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use cafego_core::{CartItemId, ProductId, Quantity, UserId};

use super::RepositoryError;
use crate::models::CartLine;

const CART_LINES_SQL: &str = r"
    SELECT c.id, c.user_id, c.product_id, c.quantity,
           p.name AS product_name, p.price AS unit_price
    FROM cart_items c
    JOIN products p ON p.id = c.product_id
    WHERE c.user_id = ?1
    ORDER BY p.name
";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's cart, one line per product, ordered by product name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(CART_LINES_SQL)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;
        Ok(lines)
    }

    /// Add units of a product to a user's cart.
    ///
    /// Inserts a new line, or adds `quantity` to the existing line for the
    /// same product. The merged quantity saturates at `Quantity::MAX`.
    /// Returns the cart row ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails (including an
    /// unknown user or product, which violates a foreign key).
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartItemId, RepositoryError> {
        debug!(user_id = %user_id, product_id = %product_id, quantity = %quantity, "Adding to cart");

        let id: CartItemId = sqlx::query_scalar(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = MIN(cart_items.quantity + excluded.quantity, ?4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity.get())
        .bind(Quantity::MAX.get())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Total number of units in a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn item_count(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM cart_items WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}

/// Read a user's cart lines on an existing connection (used inside checkout).
pub(crate) async fn lines_on(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<CartLine>, sqlx::Error> {
    sqlx::query_as::<_, CartLine>(CART_LINES_SQL)
        .bind(user_id)
        .fetch_all(conn)
        .await
}
