//! User repository for database operations.

use sqlx::SqlitePool;
use tracing::debug;

use cafego_core::{UserId, Username};

use super::RepositoryError;
use crate::models::user::{User, UserRow};

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Create a new user with a plain-text password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, username: &Username, password: &str) -> Result<User, RepositoryError> {
        debug!(username = %username, "Creating user");

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password)
            VALUES (?1, ?2)
            RETURNING id, username, password
            ",
        )
        .bind(username)
        .bind(password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "username already exists"))?;

        Ok(User::from(row))
    }

    /// Check a username/password pair.
    ///
    /// Returns the user only if the username exists and the password is an
    /// exact match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = self.get_by_username(username).await?;
        Ok(user.filter(|u| u.password_matches(password)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;

    fn username(s: &str) -> Username {
        Username::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_by_username() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.create(&username("melinoe"), "1234").await.unwrap();
        let found = repo.get_by_username("melinoe").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.username.as_str(), "melinoe");
        assert!(found.password_matches("1234"));
    }

    #[tokio::test]
    async fn test_get_by_username_not_found() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);

        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.create(&username("zagreus"), "hades").await.unwrap();
        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.username.as_str(), "zagreus");

        assert!(repo.get_by_id(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_username_conflicts() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&username("melinoe"), "1234").await.unwrap();
        let err = repo.create(&username("melinoe"), "other").await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_returns_all_users_in_creation_order() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&username("melinoe"), "1234").await.unwrap();
        repo.create(&username("hecate"), "torch").await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username.into_inner())
            .collect();
        assert_eq!(names, vec!["melinoe", "hecate"]);
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let pool = migrated_pool().await;
        let repo = UserRepository::new(&pool);
        repo.create(&username("melinoe"), "1234").await.unwrap();

        assert!(repo.verify_credentials("melinoe", "1234").await.unwrap().is_some());
        assert!(repo.verify_credentials("melinoe", "wrong").await.unwrap().is_none());
        assert!(repo.verify_credentials("nobody", "1234").await.unwrap().is_none());
    }
}
