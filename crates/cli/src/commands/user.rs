//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! cafego-cli user create -u melinoe -p 1234
//! cafego-cli user list
//! ```

use cafego_core::{UserId, Username};
use cafego_storefront::db::UserRepository;

use super::{CommandError, connect};

/// Create a new user.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns an error if the username is invalid or already taken, or if the
/// database cannot be reached.
pub async fn create(username: &str, password: &str) -> Result<UserId, CommandError> {
    let username = Username::parse(username)?;

    let pool = connect().await?;
    let user = UserRepository::new(&pool).create(&username, password).await?;
    pool.close().await;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );

    Ok(user.id)
}

/// List all users.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;
    let users = UserRepository::new(&pool).list().await?;
    pool.close().await;

    tracing::info!("{} user(s)", users.len());
    for user in users {
        tracing::info!("  {}: {}", user.id, user.username);
    }

    Ok(())
}
