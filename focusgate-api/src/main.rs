//! # FocusGate Server
//!
//! FocusGate is a small multi-user focus app: accounts, a per-user todo
//! list, a per-user website blocklist, and a motivational-quote proxy.
//! Every route except login, register, and the health probe sits behind a
//! session gate.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p focusgate-api
//! ```

use focusgate_api::{
    app::{build_router, AppState},
    config::Config,
};
use focusgate_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{create_pool, DatabaseConfig as PoolConfig},
    },
    quotes::ZenQuotesClient,
};
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focusgate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "FocusGate server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url).await?;
    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    let quotes = Arc::new(ZenQuotesClient::new(
        config.quotes.url.clone(),
        Duration::from_secs(config.quotes.timeout_seconds),
    )?);

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, quotes);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
