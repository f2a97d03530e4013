// ABOUTME: HTTP server lifecycle: bind, serve the application router, and shut down on signal
// ABOUTME: Builds ServerResources from configuration and loaded artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::artifacts;
use crate::config::ServerConfig;
use crate::resources::ServerResources;
use crate::routes;
use crate::storage::{InMemoryPredictionStore, PredictionStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Load artifacts and assemble the shared resources
///
/// # Errors
///
/// Returns an error if either artifact cannot be loaded
pub fn build_resources(config: ServerConfig) -> Result<Arc<ServerResources>> {
    let pipeline = artifacts::load_pipeline(&config.forecast)
        .context("Failed to load forecast artifacts")?;
    let store: Arc<dyn PredictionStore> = Arc::new(InMemoryPredictionStore::new());

    Ok(Arc::new(ServerResources::new(
        Arc::new(pipeline),
        store,
        Arc::new(config),
    )))
}

/// Serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = resources.config().bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Forecast server listening on http://{addr}");
    display_available_endpoints(&addr.to_string());

    axum::serve(listener, routes::router(&resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Forecast server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(base: &str) {
    info!("=== Available API Endpoints ===");
    info!("   Banner:            GET  http://{base}/");
    info!("   Health:            GET  http://{base}/health");
    info!("   Readiness:         GET  http://{base}/ready");
    info!("   Basic Forecast:    POST http://{base}/api/v1/users/{{user_id}}/body/prediction/fast-api");
    info!("   Extra Forecast:    POST http://{base}/api/v1/users/{{user_id}}/body/prediction/extra/fast-api");
    info!("   Latest Basic:      GET  http://{base}/api/v1/users/{{user_id}}/body/prediction");
    info!("   Latest Extra:      GET  http://{base}/api/v1/users/{{user_id}}/body/prediction/extra");
    info!("=== End of Endpoint List ===");
}
