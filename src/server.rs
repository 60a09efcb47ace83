//! HTTP server initialization and runtime setup.
//!
//! Opens the data file, wires the services and runs the Axum server until
//! Ctrl+C or SIGTERM.

use crate::application::services::SessionService;
use crate::config::Config;
use crate::domain::access_gate::CycleGate;
use crate::domain::repositories::SnapshotStore;
use crate::infrastructure::persistence::JsonFileStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared state from the configuration.
///
/// # Errors
///
/// Returns an error if the data file cannot be created or parsed.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = JsonFileStore::open(&config.data_file, config.verify_writes)
        .await
        .with_context(|| format!("Failed to open data file {}", config.data_file.display()))?;
    let store: Arc<dyn SnapshotStore> = Arc::new(store);

    let gate = CycleGate::new(config.store_access);
    tracing::info!("Store access policy: {}", gate.policy().as_str());

    let sessions = SessionService::new(
        config.session_signing_secret.clone(),
        config.session_ttl_seconds,
    );

    Ok(AppState::new(
        store,
        gate,
        sessions,
        config.public_base_url.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The data file cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
