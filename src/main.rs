use anyhow::Result;
use tokio::net::TcpListener;

use resume_notification_service::config::Settings;
use resume_notification_service::notification::create_notifier;
use resume_notification_service::server::{create_app, AppState};
use resume_notification_service::shutdown::{drain_notifications, shutdown_signal};
use resume_notification_service::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    init_tracing(&settings.logging)?;
    tracing::info!("Configuration loaded");

    // Create the session-wide notification store
    let notifier = create_notifier(&settings.notifications)?;

    let state = AppState::new(settings.clone(), notifier.clone());
    let shutdown_tx = state.shutdown.clone();
    tracing::info!("Application state initialized");

    let app = create_app(state);

    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // End open SSE streams so the server can drain
            let _ = shutdown_tx.send(());
        })
        .await?;

    drain_notifications(&notifier);

    tracing::info!("Server shutdown complete");
    Ok(())
}
