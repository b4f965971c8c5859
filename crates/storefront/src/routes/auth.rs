//! Authentication route handlers.
//!
//! Login checks the username and password against the `users` table, records
//! a new token in the append-only `sessions` log, and keeps that token in the
//! cookie session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{SessionRepository, UserRepository, generate_session_token};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_session_token, set_session_token};
use crate::routes::HeaderView;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub header: HeaderView,
    pub error: Option<String>,
}

/// Map an error code from the query string to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid username or password.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

/// Display the login page.
#[instrument(skip(state, user))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<LoginTemplate> {
    let header = HeaderView::load(&state, user.as_ref()).await?;

    Ok(LoginTemplate {
        header,
        error: query.error.as_deref().map(error_message),
    })
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = UserRepository::new(state.pool())
        .verify_credentials(&form.username, &form.password)
        .await?;

    let Some(user) = user else {
        tracing::warn!("Login failed");
        return Ok(Redirect::to("/login?error=credentials").into_response());
    };

    let token = generate_session_token();
    SessionRepository::new(state.pool())
        .create(&token, user.id)
        .await?;
    set_session_token(&session, &token).await?;

    set_sentry_user(&user.id, user.username.as_str());
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Redirect::to("/").into_response())
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_session_token(&session).await?;
    clear_sentry_user();

    Ok(Redirect::to("/").into_response())
}
