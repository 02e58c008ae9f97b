//! Social API server.
//!
//! Run from repo root: `cargo run -p social-server`
//! Configuration comes from the environment or a `.env` file (see `ServerConfig::from_env`).

use social_api::{app, ensure_database_exists, AppState, MemoryStore, PgStore, ServerConfig, StoreKind};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("social_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout)
                .connect(&config.database_url)
                .await?;
            let store = PgStore::new(pool, &config.schema)?;
            store.ensure_tables().await?;
            AppState::from_store(Arc::new(store))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            AppState::from_store(Arc::new(MemoryStore::new()))
        }
    };

    let router = app(state, config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
