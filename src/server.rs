//! HTTP server — router construction and lifecycle.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::Result;
use crate::handler::{KeyHandler, send_key};

/// Build the application router.
///
/// The handler is the only state; it is injected here rather than read from
/// globals so tests can mount a fake-backed handler.
#[must_use]
pub fn create_router(handler: Arc<KeyHandler>) -> Router {
    Router::new()
        .route("/key/", get(send_key))
        .with_state(handler)
}

/// Bind `address` and serve until ctrl-c or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(address: &str, handler: Arc<KeyHandler>) -> Result<()> {
    let app = create_router(handler);
    let listener = TcpListener::bind(address).await?;

    info!(address = %address, "start serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
