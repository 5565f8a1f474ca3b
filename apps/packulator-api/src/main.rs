//! # Packulator API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client ───► HTTP (8080) ───► Services ───► SQLite                     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                          packulator-core                                │
//! │                        (blocking thread pool)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use packulator_api::{app, ApiConfig};
use packulator_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load()?;

    // RUST_LOG wins over LOG_LEVEL when set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid LOG_LEVEL")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Packulator API server...");
    info!(
        address = %config.server_address(),
        database = %config.database_path,
        environment = %config.environment,
        max_requested_amount = config.max_requested_amount,
        max_search_bound = config.max_search_bound,
        timeout_ms = config.calculation_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening catalog store")?;
    info!("Catalog store ready");

    let listener = TcpListener::bind(config.server_address())
        .await
        .with_context(|| format!("binding {}", config.server_address()))?;
    info!(addr = %config.server_address(), "Listening");

    axum::serve(listener, app(db.clone(), &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
