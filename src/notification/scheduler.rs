//! Deferred execution for notification expiry.
//!
//! Timers are never cancelled. When a notification leaves the store early,
//! its timer still fires later and the removal it performs is a no-op.

use std::time::Duration;

use tokio::runtime::Handle;

use super::NotificationError;

/// Callback run when a timer fires
pub type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

/// Runs a callback once after a delay
pub trait ExpiryScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, callback: ExpiryCallback);
}

/// Scheduler backed by a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is running on
    pub fn try_current() -> Result<Self, NotificationError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| NotificationError::NoRuntime)
    }
}

impl ExpiryScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: ExpiryCallback) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
    }
}
