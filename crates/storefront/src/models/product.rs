//! Product catalog types.

use cafego_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name (unique across the catalog).
    pub name: String,
    /// Unit price in cents.
    pub price: Price,
    /// Short description.
    pub description: String,
}
