//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Product;
use crate::routes::HeaderView;
use crate::state::AppState;

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub header: HeaderView,
    pub products: Vec<Product>,
}

/// Display the product catalog.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<HomeTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;
    let header = HeaderView::load(&state, user.as_ref()).await?;

    Ok(HomeTemplate { header, products })
}
