//! Checkout and transaction history.
//!
//! Checkout converts a user's cart into one immutable transaction. The read,
//! the inserts and the cart deletion share a single database transaction, so
//! either the whole cart moves or nothing changes.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use cafego_core::{TransactionId, UserId};

use super::{RepositoryError, cart, format_timestamp};
use crate::models::LineItem;
use crate::models::transaction::{Transaction, TransactionRow};

/// Repository for checkout and transaction history.
pub struct TransactionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TransactionRepository<'a> {
    /// Create a new transaction repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out the user's cart at the current time.
    ///
    /// Returns `None` when the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails. Nothing is
    /// written in that case.
    pub async fn checkout(&self, user_id: UserId) -> Result<Option<TransactionId>, RepositoryError> {
        self.checkout_at(user_id, Utc::now()).await
    }

    /// Check out the user's cart with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails. Nothing is
    /// written in that case.
    pub async fn checkout_at(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<Option<TransactionId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = cart::lines_on(&mut tx, user_id).await?;
        if lines.is_empty() {
            debug!(user_id = %user_id, "Checkout of empty cart skipped");
            return Ok(None);
        }

        let transaction_id: TransactionId = sqlx::query_scalar(
            r"
            INSERT INTO transactions (user_id, created_at)
            VALUES (?1, ?2)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(format_timestamp(at))
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                r"
                INSERT INTO line_items (transaction_id, product_id, quantity)
                VALUES (?1, ?2, ?3)
                ",
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM cart_items WHERE id = ?1")
                .bind(line.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            user_id = %user_id,
            transaction_id = %transaction_id,
            lines = lines.len(),
            "Checkout completed"
        );

        Ok(Some(transaction_id))
    }

    /// List a user's transactions, newest first, each with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r"
            SELECT id, user_id, created_at
            FROM transactions
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut transactions = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.line_items(row.id).await?;
            transactions.push(row.with_items(items));
        }

        Ok(transactions)
    }

    /// Line items of one transaction, joined with product name and price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn line_items(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<LineItem>, RepositoryError> {
        let items = sqlx::query_as::<_, LineItem>(
            r"
            SELECT l.id, l.transaction_id, l.product_id, l.quantity,
                   p.name AS product_name, p.price AS unit_price
            FROM line_items l
            JOIN products p ON p.id = l.product_id
            WHERE l.transaction_id = ?1
            ORDER BY p.name
            ",
        )
        .bind(transaction_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
