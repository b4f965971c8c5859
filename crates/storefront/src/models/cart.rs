//! Cart types.

use cafego_core::{CartItemId, Price, ProductId, UserId};

/// One product line in a user's cart, joined with product details.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartLine {
    /// Cart row ID.
    pub id: CartItemId,
    /// Owner of the cart.
    pub user_id: UserId,
    /// Product in this line.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i64,
    /// Product name (joined at read time).
    pub product_name: String,
    /// Current unit price (joined at read time).
    pub unit_price: Price,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Sum of all line totals.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Price {
    lines.iter().map(CartLine::line_total).sum()
}
