//! Reelgate API server entry point

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use reelgate_api::{db, routes::create_router, store::PgUserStore, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing secret material is startup-fatal, not a per-request error
    let config = Config::from_env().context("failed to load configuration")?;
    let bind_address = config.bind_address.clone();

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let users = Arc::new(PgUserStore::new(pool));
    let state = AppState::new(config, users);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!(address = %bind_address, "reelgate-api listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
