//! Session notifications: the store, the API used to publish into it,
//! auto-expiry and scoped access.
//!
//! # Lifecycle
//!
//! A notification is added through [`Notifier`], stays in the store in
//! creation order, and leaves it when its timer fires, when it is removed by
//! id, or when the store is cleared. Notifications with a duration of `0`
//! only leave through the last two.

mod events;
mod notifier;
mod provider;
mod scheduler;
mod store;
mod types;

use std::sync::Arc;

use thiserror::Error;

use crate::config::NotificationConfig;

pub use events::{RemovalReason, StoreEvent};
pub use notifier::Notifier;
pub use provider::{try_use_notifications, use_notifications, NotificationProvider};
pub use scheduler::{ExpiryCallback, ExpiryScheduler, TokioScheduler};
pub use store::{NotificationStore, NotifierStats, DEFAULT_EVENT_BUFFER};
pub use types::{Kind, Notification, NotificationId, DEFAULT_DURATION_MS};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("use_notifications must be used within a NotificationProvider")]
    MissingProvider,

    #[error("notification timers need a running tokio runtime")]
    NoRuntime,
}

/// Build a notifier on the current tokio runtime from configuration
pub fn create_notifier(config: &NotificationConfig) -> Result<Notifier, NotificationError> {
    let scheduler = Arc::new(TokioScheduler::try_current()?);
    let store = Arc::new(NotificationStore::with_event_buffer(config.event_buffer));

    tracing::info!(
        default_duration_ms = config.default_duration_ms,
        event_buffer = config.event_buffer,
        "Creating notification store"
    );

    Ok(Notifier::new(store, scheduler).with_default_duration(config.default_duration_ms))
}
