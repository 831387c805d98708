// ABOUTME: Listener setup and serving loop for the base64-gate HTTP server.
// ABOUTME: Binds the configured address and serves until Ctrl+C or SIGTERM triggers graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::routes::create_router;

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve(listener, config).await
}

/// Serve the API on an already-bound listener.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> std::io::Result<()> {
    let addr = listener.local_addr()?;

    if config.api_key.is_none() {
        tracing::warn!("x_api_key is not set; /encode and /decode will reject every request");
    }

    tracing::info!(
        address = %addr,
        decode_mode = %config.decode_mode,
        body_limit = config.body_limit,
        "server listening"
    );

    let app = create_router(Arc::new(AppState::new(config)));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}
