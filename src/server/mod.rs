//! HTTP server exposing the checker.
//!
//! Provides three endpoints:
//! - `GET /api/check?domain=<raw>` - check one domain
//! - `POST /api/check` - check one domain given as `{"url": "<raw>"}`
//! - `/status` - JSON counters of checks run so far
//!
//! Check answers are `{url, isUp, reason, checkedAt}`. Invalid input is a 400,
//! an exhausted check pool a 503, and a check that died a 500 with `isUp:false`.

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error_handling::InitializationError;
use handlers::{check_get_handler, check_post_handler, status_handler};
pub use types::{CheckQuery, CheckRequest, ErrorResponse, ServerState, StatusResponse};

/// Builds the router over shared state.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/check",
            get(check_get_handler).post(check_post_handler),
        )
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `0.0.0.0:<port>` and serves until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn start_server(
    port: u16,
    state: ServerState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| InitializationError::BindError { port, source })?;

    log::info!("Check server listening on http://0.0.0.0:{}/", port);
    log::info!("  - Check: http://0.0.0.0:{}/api/check?domain=example.com", port);
    log::info!("  - Status: http://0.0.0.0:{}/status", port);

    serve(listener, state, shutdown).await
}

/// Serves on an already bound listener until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve(
    listener: TcpListener,
    state: ServerState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Check server error: {}", e))?;

    log::info!("Check server stopped");
    Ok(())
}
