//! Login token repository.
//!
//! Every successful login appends a `(token, user_id)` row. Rows are never
//! updated or deleted; a token stays valid for as long as the client keeps it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use cafego_core::UserId;

use super::{RepositoryError, format_timestamp};
use crate::models::user::{User, UserRow};

/// Number of random bytes in a login token.
const TOKEN_BYTES: usize = 32;

/// Generate a new random login token (URL-safe base64, no padding).
#[must_use]
pub fn generate_session_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Repository for login token operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a token for a user. The caller supplies the token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including an
    /// unknown user id, which violates the foreign key).
    pub async fn create(&self, token: &str, user_id: UserId) -> Result<(), RepositoryError> {
        debug!(user_id = %user_id, "Recording login token");

        sqlx::query(
            r"
            INSERT INTO sessions (token, user_id, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(token)
        .bind(user_id)
        .bind(format_timestamp(Utc::now()))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Resolve a token to its user.
    ///
    /// Returns `None` for an unknown token. If the same token was recorded
    /// more than once, the most recent row wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT u.id, u.username, u.password
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?1
            ORDER BY s.id DESC
            LIMIT 1
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cafego_core::Username;

    use super::*;
    use crate::db::UserRepository;
    use crate::db::test_support::migrated_pool;

    #[test]
    fn test_generate_session_token() {
        let a = generate_session_token();
        let b = generate_session_token();

        // 32 bytes -> 43 base64 chars without padding
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[tokio::test]
    async fn test_token_resolves_to_user() {
        let pool = migrated_pool().await;
        let user = UserRepository::new(&pool)
            .create(&Username::parse("melinoe").unwrap(), "1234")
            .await
            .unwrap();
        let sessions = SessionRepository::new(&pool);

        sessions.create("token-abc", user.id).await.unwrap();

        let resolved = sessions.get_user_by_token("token-abc").await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.username.as_str(), "melinoe");
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let pool = migrated_pool().await;
        let sessions = SessionRepository::new(&pool);

        assert!(sessions.get_user_by_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_resolves_to_latest_user() {
        let pool = migrated_pool().await;
        let users = UserRepository::new(&pool);
        let first = users
            .create(&Username::parse("melinoe").unwrap(), "1234")
            .await
            .unwrap();
        let second = users
            .create(&Username::parse("hecate").unwrap(), "torch")
            .await
            .unwrap();
        let sessions = SessionRepository::new(&pool);

        sessions.create("shared", first.id).await.unwrap();
        sessions.create("shared", second.id).await.unwrap();

        let resolved = sessions.get_user_by_token("shared").await.unwrap().unwrap();
        assert_eq!(resolved.id, second.id);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_is_rejected() {
        let pool = migrated_pool().await;
        let sessions = SessionRepository::new(&pool);

        let result = sessions.create("orphan", UserId::new(42)).await;
        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
