//! Completed checkout records.

use chrono::{DateTime, Utc};

use cafego_core::{LineItemId, Price, ProductId, TransactionId, UserId};

/// A completed checkout. Immutable once written.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Unique transaction ID.
    pub id: TransactionId,
    /// Purchasing user.
    pub user_id: UserId,
    /// When the checkout happened.
    pub created_at: DateTime<Utc>,
    /// Purchased lines.
    pub items: Vec<LineItem>,
}

impl Transaction {
    /// Total price of all line items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Creation time formatted for display.
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// Database row for the `transactions` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TransactionRow {
    pub id: TransactionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl TransactionRow {
    pub(crate) fn with_items(self, items: Vec<LineItem>) -> Transaction {
        Transaction {
            id: self.id,
            user_id: self.user_id,
            created_at: self.created_at,
            items,
        }
    }
}

/// One product line of a transaction, joined with product details.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LineItem {
    /// Line item ID.
    pub id: LineItemId,
    /// Owning transaction.
    pub transaction_id: TransactionId,
    /// Purchased product.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i64,
    /// Product name (joined at read time).
    pub product_name: String,
    /// Unit price (joined at read time).
    pub unit_price: Price,
}

impl LineItem {
    /// Price of the whole line.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
