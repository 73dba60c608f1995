//! # Estoque API
//!
//! Server entry point.
//!
//! ```text
//! .env ──► ApiConfig ──► Database (SQLite + inventory)
//!                    ──► AwesomeApiGateway
//!                    ──► AppState ──► create_app ──► axum::serve
//!                                                     (graceful shutdown)
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use estoque_api::{create_app, ApiConfig, AppState, AwesomeApiGateway};
use estoque_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,estoque=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting Estoque API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr(),
        database = %config.database_url,
        quote_url = %config.quote_url,
        quote_timeout_secs = config.quote_timeout.as_secs(),
        fallback_rate = config.quote_fallback_rate.is_some(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_url))
        .await
        .context("opening database")?;

    let rates = AwesomeApiGateway::new(&config.quote_url, config.quote_timeout)
        .context("building quote gateway")?;

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(db.clone(), Arc::new(rates), config));
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
