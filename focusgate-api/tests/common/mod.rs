/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - A migrated in-memory database
/// - A router wired to a stub quote source (no network)
/// - Session cookie helpers
/// - Request/response plumbing via `tower::Service`

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use focusgate_api::app::{build_router, AppState};
use focusgate_api::config::{ApiConfig, Config, DatabaseConfig, QuoteConfig, SessionConfig};
use focusgate_shared::auth::session::{create_session_token, SessionClaims};
use focusgate_shared::db::migrations::run_migrations;
use focusgate_shared::quotes::StaticQuotes;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::Service as _;

/// Secret used to sign session tokens in tests (32+ bytes)
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Quote served by the stub source
pub const TEST_QUOTE: &str = "Focus on what matters.";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    ///
    /// The pool is pinned to one connection: each connection to
    /// `:memory:` would otherwise get its own private database.
    pub async fn new() -> anyhow::Result<Self> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: TEST_SECRET.to_string(),
            },
            quotes: QuoteConfig {
                url: "http://127.0.0.1:1/api/random".to_string(),
                timeout_seconds: 1,
            },
        };

        let quotes = Arc::new(StaticQuotes::new(TEST_QUOTE, "FocusGate"));
        let state = AppState::new(db.clone(), config, quotes);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Builds a Cookie header value for a signed-in user, bypassing the
    /// login flow
    pub fn session_cookie_for(&self, user_id: i64) -> String {
        let claims = SessionClaims::new(user_id);
        let token = create_session_token(&claims, TEST_SECRET).expect("token should sign");
        format!("session={}", token)
    }

    /// Registers and logs in a user through the HTTP surface, returning
    /// the Cookie header value the browser would carry afterwards
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let body = credentials_body(username, password);

        let response = self.send(form_post("/register", None, &body)).await;
        assert_eq!(response.status(), 303, "register should redirect");

        let response = self.send(form_post("/login", None, &body)).await;
        assert_eq!(response.status(), 303, "login should redirect");

        let token = set_cookie_token(&response).expect("login should set a session cookie");
        format!("session={}", token)
    }

    /// Drives one request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .call(request)
            .await
            .expect("router call should succeed")
    }
}

/// URL-encodes a credentials form body
pub fn credentials_body(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

/// Builds a GET request, optionally with a session cookie
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request should build")
}

/// Builds a form POST request, optionally with a session cookie
pub fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Extracts the Location header of a redirect
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .expect("Location should be valid UTF-8")
        .to_string()
}

/// Extracts the session token from a Set-Cookie header, if any
pub fn set_cookie_token(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let token = value
        .split(';')
        .next()?
        .trim()
        .strip_prefix("session=")?
        .to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
