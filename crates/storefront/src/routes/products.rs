//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use cafego_core::{ProductId, Quantity};

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::Product;
use crate::routes::HeaderView;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Raw quantity field; anything unparseable becomes 1.
    pub quantity: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub header: HeaderView,
    pub product: Product,
}

/// Parse a product ID from the URL. Non-numeric IDs are treated as unknown.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse::<i64>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound(format!("product {raw}")))
}

/// Look up a product, mapping a missing row to 404.
async fn find_product(state: &AppState, raw_id: &str) -> Result<Product> {
    let id = parse_product_id(raw_id)?;
    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display product detail page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<ProductTemplate> {
    let product = find_product(&state, &id).await?;
    let header = HeaderView::load(&state, user.as_ref()).await?;

    Ok(ProductTemplate { header, product })
}

/// Add the product to the user's cart and return to the catalog.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = find_product(&state, &id).await?;
    let quantity = Quantity::from_form(form.quantity.as_deref());

    CartRepository::new(state.pool())
        .add_item(user.id, product.id, quantity)
        .await?;

    tracing::info!(product_id = %product.id, quantity = %quantity, "Added to cart");

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("3").unwrap(), ProductId::new(3));
        assert!(matches!(
            parse_product_id("abc"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(parse_product_id(""), Err(AppError::NotFound(_))));
    }
}
