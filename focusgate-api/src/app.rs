/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use focusgate_api::{app::AppState, config::Config};
/// use focusgate_shared::db::pool::{create_pool, DatabaseConfig};
/// use focusgate_shared::quotes::ZenQuotesClient;
/// use std::{sync::Arc, time::Duration};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let quotes = Arc::new(ZenQuotesClient::new(
///     config.quotes.url.clone(),
///     Duration::from_secs(config.quotes.timeout_seconds),
/// )?);
/// let state = AppState::new(pool, config, quotes);
/// let app = focusgate_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, gate};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use focusgate_shared::{
    auth::session::{self, Session},
    quotes::QuoteSource,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Quote source, swappable so tests run without network access
    pub quotes: Arc<dyn QuoteSource>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            quotes,
        }
    }

    /// Gets the secret used to sign session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                      # landing page (authenticated)
/// ├── GET  /health                # liveness probe (public)
/// ├── GET/POST /register          # create account (public)
/// ├── GET/POST /login             # authenticate (public)
/// ├── GET  /logout                # end session
/// ├── POST /delete_account        # cascade-delete the account
/// ├── GET/POST /todo              # list/add tasks
/// ├── POST /todo/complete/:id     # mark complete
/// ├── POST /todo/undo/:id         # mark incomplete
/// ├── POST /todo/delete/:id       # delete task
/// ├── GET  /quotes                # motivational quote
/// ├── GET/POST /blocker           # list/add blocked sites
/// └── POST /remove_site           # delete blocked site
/// ```
///
/// # Middleware Stack
///
/// Applied outermost first:
/// 1. Logging (tower-http TraceLayer)
/// 2. Session gate (cookie → `Session`, deny-by-default allow-list)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/", get(routes::home::index))
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route("/delete_account", post(routes::auth::delete_account))
        .route(
            "/todo",
            get(routes::todo::todo_page).post(routes::todo::add_task),
        )
        .route("/todo/complete/:id", post(routes::todo::complete_task))
        .route("/todo/undo/:id", post(routes::todo::undo_task))
        .route("/todo/delete/:id", post(routes::todo::delete_task))
        .route("/quotes", get(routes::quotes::quotes_page))
        .route(
            "/blocker",
            get(routes::blocker::blocker_page).post(routes::blocker::add_site),
        )
        .route("/remove_site", post(routes::blocker::remove_site))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session gate middleware
///
/// Resolves the `session` cookie into a `Session` (an invalid or expired
/// token counts as anonymous, not as an error), consults the gate, and
/// either injects the session into request extensions and dispatches or
/// redirects to the login page.
async fn session_gate_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match session_cookie(req.headers()) {
        Some(token) => match session::validate_session_token(token, state.session_secret()) {
            Ok(claims) => Session::authenticated(claims.sub),
            Err(_) => Session::anonymous(),
        },
        None => Session::anonymous(),
    };

    match gate::check(req.uri().path(), &session) {
        gate::Decision::Allow => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        gate::Decision::RedirectToLogin => Redirect::to("/login").into_response(),
    }
}

/// Extracts the session token from the Cookie header, if present
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix("session="))
}
