//! pf-server: HTTP API for the pixforge image operations.
//!
//! This crate wires the operations from `pf-av` into an axum application:
//!
//! - Multipart upload extraction with per-field validation
//! - Error-to-response mapping (`{"detail": ...}` bodies)
//! - Request ID middleware and HTTP tracing
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod upload;

use std::sync::Arc;

use pf_av::{FfmpegTool, MediaTool, ToolRegistry};
use pf_core::config::Config;

use crate::context::AppContext;

/// Start the pixforge server.
///
/// Discovers the external tools, builds the [`AppContext`] and serves HTTP
/// until SIGINT or SIGTERM is received.
pub async fn start(config: Config) -> pf_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    // Discover external tools.
    let tools = Arc::new(ToolRegistry::discover(&config.tools));
    for info in tools.check_all() {
        if info.available {
            tracing::info!(
                "Tool found: {} ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown version")
            );
        } else {
            tracing::warn!("Tool not found: {}", info.name);
        }
    }

    let tool: Arc<dyn MediaTool> = Arc::new(FfmpegTool::from_registry(&tools, &config.tools)?);

    let ctx = AppContext::new(config.clone(), tool, tools);
    let app = router::build_router(ctx);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
