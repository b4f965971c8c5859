//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use cafego_core::Price;

use crate::db::{CartRepository, TransactionRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CartLine, cart::subtotal};
use crate::routes::HeaderView;
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub header: HeaderView,
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
}

/// Display the user's cart.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate> {
    let lines = CartRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    let header = HeaderView::load(&state, Some(&user)).await?;

    Ok(CartTemplate {
        header,
        subtotal: subtotal(&lines),
        lines,
    })
}

/// Check out the user's cart.
///
/// An empty cart is a no-op; either way the user lands back on the catalog.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    TransactionRepository::new(state.pool())
        .checkout(user.id)
        .await?;

    Ok(Redirect::to("/").into_response())
}
