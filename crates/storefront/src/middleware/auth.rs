//! Authentication extractors.
//!
//! The cookie session stores the login token issued at login. Each request
//! resolves that token to a user through the `sessions` table, so a token
//! whose row is gone (or never existed) is treated as anonymous.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::SessionRepository;
use crate::error::{AppError, set_sentry_user};
use crate::models::{User, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in user.
///
/// Anonymous requests are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Rejection for `RequireAuth`.
pub enum AuthRejection {
    /// No user is logged in.
    RedirectToLogin,
    /// The session or database lookup failed.
    Failed(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        match resolve_user(parts, &state).await {
            Ok(Some(user)) => Ok(Self(user)),
            Ok(None) => Err(AuthRejection::RedirectToLogin),
            Err(err) => Err(AuthRejection::Failed(err)),
        }
    }
}

/// Extractor that optionally gets the logged-in user.
///
/// Unlike `RequireAuth`, this does not reject anonymous requests.
pub struct OptionalAuth(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(resolve_user(parts, &state).await?))
    }
}

/// Look up the session's login token and the user it belongs to.
async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let Some(session) = parts.extensions.get::<Session>() else {
        return Ok(None);
    };

    let Some(token) = session.get::<String>(session_keys::SESSION_TOKEN).await? else {
        return Ok(None);
    };

    let user = SessionRepository::new(state.pool())
        .get_user_by_token(&token)
        .await?;

    if let Some(user) = &user {
        tracing::Span::current().record("user_id", user.id.as_i64());
        set_sentry_user(&user.id, user.username.as_str());
    }

    Ok(user)
}

/// Store a freshly issued login token in the session.
///
/// The session ID is rotated first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_session_token(
    session: &Session,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::SESSION_TOKEN, token).await
}

/// Remove the login token from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session_token(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::SESSION_TOKEN)
        .await?;
    Ok(())
}
