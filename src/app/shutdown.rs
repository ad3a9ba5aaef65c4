//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels `shutdown` on the first ctrl-c.
///
/// The returned task ends when either the signal arrives or the token is
/// cancelled elsewhere.
pub fn cancel_on_ctrl_c(shutdown: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    log::info!("Received ctrl-c, shutting down");
                    shutdown.cancel();
                }
                Err(e) => {
                    // Without a signal handler only an explicit cancel stops us
                    log::warn!("Failed to listen for ctrl-c: {}", e);
                    shutdown.cancelled().await;
                }
            },
            _ = shutdown.cancelled() => {}
        }
    })
}
