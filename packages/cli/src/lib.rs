// ABOUTME: Server bootstrap for Tickbox
// ABOUTME: Tracing setup, database initialization, listener binding and graceful shutdown

use std::future::Future;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tickbox_api::create_app;
use tickbox_config::Config;
use tickbox_storage::DbState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Initialize the database, then serve until Ctrl-C or SIGTERM.
///
/// The schema is in place before the listener is bound; if that fails the
/// server never accepts a connection.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Starting Tickbox server");
    info!("CORS origin: {}", config.cors_origin);

    let db = DbState::connect(&config.database)
        .await
        .context("Failed to initialize database")?;

    let listener = match TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            db.close().await;
            return Err(e).with_context(|| {
                format!("Failed to bind {}:{}", config.host, config.port)
            });
        }
    };

    serve(listener, db, &config.cors_origin, shutdown_signal()).await
}

/// Serve the API on an already bound listener and close the pool once the
/// server has drained.
pub async fn serve<F>(
    listener: TcpListener,
    db: DbState,
    cors_origin: &str,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = match create_app(db.clone(), cors_origin) {
        Ok(app) => app,
        Err(e) => {
            db.close().await;
            return Err(e).context("Failed to build application");
        }
    };

    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on {}", addr);
    }

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    db.close().await;
    info!("Server stopped");

    result.context("Server error")
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests;
