//! Scoped access to the notifier.
//!
//! Code running inside [`NotificationProvider::scope`] (or `sync_scope`) can
//! reach the notifier with [`use_notifications`]. Calling it anywhere else is
//! a programming error and panics straight away.

use std::future::Future;

use super::{NotificationError, Notifier};

tokio::task_local! {
    static CURRENT: Notifier;
}

/// Makes a notifier available to everything run inside its scope
#[derive(Clone)]
pub struct NotificationProvider {
    notifier: Notifier,
}

impl NotificationProvider {
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Run a future with the notifier in scope
    pub async fn scope<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT.scope(self.notifier.clone(), fut).await
    }

    /// Run a closure with the notifier in scope
    pub fn sync_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT.sync_scope(self.notifier.clone(), f)
    }
}

/// Notifier of the enclosing provider, or `MissingProvider`
pub fn try_use_notifications() -> Result<Notifier, NotificationError> {
    CURRENT
        .try_with(Notifier::clone)
        .map_err(|_| NotificationError::MissingProvider)
}

/// Notifier of the enclosing provider.
///
/// # Panics
///
/// Panics when called outside a `NotificationProvider` scope.
pub fn use_notifications() -> Notifier {
    match try_use_notifications() {
        Ok(notifier) => notifier,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notification::{Kind, NotificationStore, TokioScheduler};

    fn provider() -> NotificationProvider {
        let scheduler = Arc::new(TokioScheduler::try_current().unwrap());
        NotificationProvider::new(Notifier::new(Arc::new(NotificationStore::new()), scheduler))
    }

    #[test]
    fn test_missing_provider_is_reported() {
        assert!(matches!(
            try_use_notifications(),
            Err(NotificationError::MissingProvider)
        ));
    }

    #[test]
    #[should_panic(expected = "must be used within a NotificationProvider")]
    fn test_use_outside_provider_panics() {
        use_notifications();
    }

    #[tokio::test]
    async fn test_scope_exposes_shared_notifier() {
        let provider = provider();

        let id = provider
            .scope(async { use_notifications().success("Profile updated", Some(0)) })
            .await;

        let stored = provider.notifier().get(id).unwrap();
        assert_eq!(stored.kind, Kind::Success);
        assert_eq!(stored.message, "Profile updated");
    }

    #[tokio::test]
    async fn test_sync_scope() {
        let provider = provider();
        provider.sync_scope(|| use_notifications().info("hi", Some(0)));
        assert_eq!(provider.notifier().len(), 1);

        assert!(try_use_notifications().is_err());
    }
}
