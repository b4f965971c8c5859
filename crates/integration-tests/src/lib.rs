//! Integration tests for CafeGo.
//!
//! Each test drives the full storefront router (all middleware layers
//! included) against a private in-memory SQLite database. No server or
//! external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafego-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use sqlx::SqlitePool;
use tower::ServiceExt;

use cafego_storefront::config::StorefrontConfig;
use cafego_storefront::db;
use cafego_storefront::middleware::session::SESSION_COOKIE_NAME;
use cafego_storefront::state::AppState;

/// A response with its body read into memory.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub location: Option<String>,
    pub body: String,
}

/// The storefront router plus a cookie jar holding the session cookie.
pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Fresh storefront with the demo catalog and demo user seeded.
    pub async fn spawn() -> Self {
        let app = Self::spawn_empty().await;
        db::seed_demo_data(&app.pool).await.unwrap();
        app
    }

    /// Fresh storefront with an empty (but migrated) database.
    pub async fn spawn_empty() -> Self {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let config = StorefrontConfig::with_database_url("sqlite::memory:");
        let router = cafego_storefront::build_app(AppState::new(config, pool.clone()));

        Self {
            pool,
            router,
            cookie: None,
        }
    }

    /// Whether a session cookie is currently held.
    #[must_use]
    pub const fn has_session_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a POST request with a URL-encoded form body.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .unwrap();
        self.send(request).await
    }

    /// Log in through the login form.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &format!("username={username}&password={password}"))
            .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            self.store_cookie(value.to_str().unwrap());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        if name != SESSION_COOKIE_NAME {
            return;
        }

        let expired = set_cookie.to_ascii_lowercase().contains("max-age=0");
        self.cookie = if value.is_empty() || expired {
            None
        } else {
            Some(pair.to_owned())
        };
    }
}
