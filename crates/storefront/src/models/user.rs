//! User domain types.

use secrecy::{ExposeSecret, SecretString};

use cafego_core::{UserId, Username};

/// A storefront user (domain type).
///
/// Passwords are stored and compared in plain text; the `SecretString`
/// wrapper only keeps them out of `Debug` output and logs.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Plain-text password.
    pub password: SecretString,
}

impl User {
    /// Check a submitted password against the stored one.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

/// Database row for the `users` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub username: Username,
    pub password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: SecretString::from(row.password),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn melinoe() -> User {
        User {
            id: UserId::new(1),
            username: Username::parse("melinoe").unwrap(),
            password: SecretString::from("1234"),
        }
    }

    #[test]
    fn test_password_matches() {
        let user = melinoe();
        assert!(user.password_matches("1234"));
        assert!(!user.password_matches("12345"));
        assert!(!user.password_matches(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", melinoe());
        assert!(debug_output.contains("melinoe"));
        assert!(!debug_output.contains("1234"));
    }
}
