//! Graceful shutdown signals.

use std::future::Future;
use std::io;
use tracing::{error, info};

/// Resolves once `listener` reports that `signal` was delivered.
///
/// If the listener cannot be installed this never resolves, so the server
/// keeps running on the remaining signals.
pub async fn signal_received<F>(signal: &str, listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    match listener.await {
        Ok(()) => info!(signal, "Shutdown signal received"),
        Err(e) => {
            error!(signal, error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = signal_received("SIGINT", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_received("SIGTERM", async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutting down");
}
