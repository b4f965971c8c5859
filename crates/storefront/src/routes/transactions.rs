//! Transaction history route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::TransactionRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Transaction;
use crate::routes::HeaderView;
use crate::state::AppState;

/// Transaction history template.
#[derive(Template, WebTemplate)]
#[template(path = "transactions.html")]
pub struct TransactionsTemplate {
    pub header: HeaderView,
    pub transactions: Vec<Transaction>,
}

/// Display the user's completed checkouts, newest first.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<TransactionsTemplate> {
    let transactions = TransactionRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    let header = HeaderView::load(&state, Some(&user)).await?;

    Ok(TransactionsTemplate {
        header,
        transactions,
    })
}
