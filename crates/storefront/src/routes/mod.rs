//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Product catalog
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (database)
//!
//! # Auth
//! GET  /login              - Login page
//! POST /login              - Login action
//! POST /logout             - Logout action
//!
//! # Products
//! GET  /product/{id}       - Product detail
//! POST /product/{id}       - Add to cart (requires auth)
//!
//! # Cart (requires auth)
//! GET  /cart/              - Cart page
//! POST /cart/              - Checkout
//!
//! # History (requires auth)
//! GET  /transactions/      - Completed checkouts, newest first
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod products;
pub mod transactions;

use axum::{
    Router,
    routing::{get, post},
};

use crate::db::CartRepository;
use crate::error::Result;
use crate::models::User;
use crate::state::AppState;

/// Header data shared by every page (rendered by `base.html`).
#[derive(Debug, Clone, Default)]
pub struct HeaderView {
    /// Logged-in username, if any.
    pub username: Option<String>,
    /// Total units in the user's cart.
    pub cart_count: i64,
}

impl HeaderView {
    /// Build the header for the current (possibly anonymous) user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the cart count query fails.
    pub async fn load(state: &AppState, user: Option<&User>) -> Result<Self> {
        let Some(user) = user else {
            return Ok(Self::default());
        };

        let cart_count = CartRepository::new(state.pool())
            .item_count(user.id)
            .await?;

        Ok(Self {
            username: Some(user.username.to_string()),
            cart_count,
        })
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/product/{id}",
            get(products::show).post(products::add_to_cart),
        )
        .route("/cart", get(cart::show).post(cart::checkout))
        .route("/cart/", get(cart::show).post(cart::checkout))
        .route("/transactions", get(transactions::index))
        .route("/transactions/", get(transactions::index))
}
