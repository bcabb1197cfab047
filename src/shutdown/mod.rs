//! Graceful shutdown handling.
//!
//! On Ctrl+C or SIGTERM the shutdown signal is broadcast so open SSE streams
//! end, the server stops accepting connections, and whatever notifications
//! remain are cleared.

use tokio::signal;

use crate::notification::Notifier;

/// Resolves once the process is asked to stop
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}

/// Summary of what was discarded at shutdown
#[derive(Debug, Default)]
pub struct ShutdownResult {
    /// Notifications still active when the service stopped
    pub discarded_notifications: usize,
    /// SSE streams still open when the service stopped
    pub open_streams: usize,
}

/// Empty the store before exit and report what was discarded
pub fn drain_notifications(notifier: &Notifier) -> ShutdownResult {
    let open_streams = notifier.subscriber_count();
    let discarded_notifications = notifier.clear();

    tracing::info!(
        discarded_notifications = discarded_notifications,
        open_streams = open_streams,
        "Notification store drained"
    );

    ShutdownResult {
        discarded_notifications,
        open_streams,
    }
}
