use std::sync::Arc;

use tokio::sync::broadcast;

use super::{
    ExpiryScheduler, Kind, Notification, NotificationId, NotificationStore, NotifierStats,
    RemovalReason, StoreEvent, DEFAULT_DURATION_MS,
};

/// Handle through which the application publishes notifications.
///
/// Cloning is cheap; every clone shares the same store. Each `add` with a
/// positive duration schedules exactly one expiry timer.
#[derive(Clone)]
pub struct Notifier {
    store: Arc<NotificationStore>,
    scheduler: Arc<dyn ExpiryScheduler>,
    default_duration_ms: u64,
}

impl Notifier {
    pub fn new(store: Arc<NotificationStore>, scheduler: Arc<dyn ExpiryScheduler>) -> Self {
        Self {
            store,
            scheduler,
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }

    /// Override the duration used when callers don't pass one
    pub fn with_default_duration(mut self, duration_ms: u64) -> Self {
        self.default_duration_ms = duration_ms;
        self
    }

    /// Add a notification and return its id.
    ///
    /// `duration_ms` of `None` uses the default; `Some(0)` keeps the
    /// notification until it is removed or the store is cleared.
    pub fn add(&self, message: impl Into<String>, kind: Kind, duration_ms: Option<u64>) -> NotificationId {
        self.add_notification(message, kind, duration_ms).id
    }

    /// Same as [`Notifier::add`], returning the stored notification
    pub fn add_notification(
        &self,
        message: impl Into<String>,
        kind: Kind,
        duration_ms: Option<u64>,
    ) -> Notification {
        let duration_ms = duration_ms.unwrap_or(self.default_duration_ms);
        let notification = self.store.insert(message.into(), kind, duration_ms);
        let id = notification.id;

        if let Some(delay) = notification.expiry_delay() {
            let store = Arc::downgrade(&self.store);
            self.scheduler.schedule(
                delay,
                Box::new(move || {
                    if let Some(store) = store.upgrade() {
                        store.remove(id, RemovalReason::Expired);
                    }
                }),
            );
        }

        notification
    }

    pub fn success(&self, message: impl Into<String>, duration_ms: Option<u64>) -> NotificationId {
        self.add(message, Kind::Success, duration_ms)
    }

    pub fn error(&self, message: impl Into<String>, duration_ms: Option<u64>) -> NotificationId {
        self.add(message, Kind::Error, duration_ms)
    }

    pub fn warning(&self, message: impl Into<String>, duration_ms: Option<u64>) -> NotificationId {
        self.add(message, Kind::Warning, duration_ms)
    }

    pub fn info(&self, message: impl Into<String>, duration_ms: Option<u64>) -> NotificationId {
        self.add(message, Kind::Info, duration_ms)
    }

    /// Dismiss a notification. Unknown ids are ignored.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.store.remove(id, RemovalReason::Dismissed)
    }

    pub fn clear(&self) -> usize {
        self.store.clear()
    }

    pub fn list(&self) -> Vec<Notification> {
        self.store.snapshot()
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }

    pub fn stats(&self) -> NotifierStats {
        self.store.stats()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::notification::ExpiryCallback;

    /// Holds callbacks until the test fires them
    #[derive(Default)]
    struct ManualScheduler {
        pending: Mutex<Vec<(Duration, ExpiryCallback)>>,
    }

    impl ManualScheduler {
        fn scheduled(&self) -> Vec<Duration> {
            self.pending.lock().unwrap().iter().map(|(d, _)| *d).collect()
        }

        fn fire_all(&self) {
            let callbacks: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
            for (_, callback) in callbacks {
                callback();
            }
        }
    }

    impl ExpiryScheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, callback: ExpiryCallback) {
            self.pending.lock().unwrap().push((delay, callback));
        }
    }

    fn notifier() -> (Notifier, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::default());
        let notifier = Notifier::new(Arc::new(NotificationStore::new()), scheduler.clone());
        (notifier, scheduler)
    }

    #[test]
    fn test_one_timer_per_expiring_add() {
        let (notifier, scheduler) = notifier();

        notifier.success("Saved", None);
        notifier.error("Upload failed", Some(0));
        notifier.warning("Slow network", Some(1200));

        assert_eq!(
            scheduler.scheduled(),
            vec![Duration::from_millis(5000), Duration::from_millis(1200)]
        );
    }

    #[test]
    fn test_wrappers_set_kind() {
        let (notifier, _) = notifier();
        notifier.success("s", None);
        notifier.error("e", None);
        notifier.warning("w", None);
        notifier.info("i", None);

        let kinds: Vec<Kind> = notifier.list().into_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![Kind::Success, Kind::Error, Kind::Warning, Kind::Info]);
        assert!(notifier.list().iter().all(|n| n.duration_ms == DEFAULT_DURATION_MS));
    }

    #[test]
    fn test_expiry_removes_only_its_own_id() {
        let (notifier, scheduler) = notifier();
        let transient = notifier.info("transient", Some(10));
        let sticky = notifier.info("sticky", Some(0));

        scheduler.fire_all();

        assert!(notifier.get(transient).is_none());
        assert!(notifier.get(sticky).is_some());
        assert_eq!(notifier.stats().expired, 1);
    }

    #[test]
    fn test_timer_after_clear_is_noop() {
        let (notifier, scheduler) = notifier();
        notifier.info("a", None);
        notifier.info("b", None);

        assert_eq!(notifier.clear(), 2);
        let later = notifier.info("c", Some(0));

        scheduler.fire_all();

        let remaining: Vec<NotificationId> = notifier.list().into_iter().map(|n| n.id).collect();
        assert_eq!(remaining, vec![later]);
        assert_eq!(notifier.stats().expired, 0);
    }

    #[test]
    fn test_timer_after_dismiss_is_noop() {
        let (notifier, scheduler) = notifier();
        let id = notifier.success("Saved", None);

        assert!(notifier.remove(id));
        scheduler.fire_all();

        let stats = notifier.stats();
        assert_eq!(stats.dismissed, 1);
        assert_eq!(stats.expired, 0);
    }

    #[test]
    fn test_timer_after_store_dropped_is_noop() {
        let (notifier, scheduler) = notifier();
        notifier.info("orphan", None);
        drop(notifier);

        scheduler.fire_all();
    }

    #[test]
    fn test_configured_default_duration() {
        let (notifier, scheduler) = notifier();
        let notifier = notifier.with_default_duration(800);
        notifier.info("quick", None);

        assert_eq!(scheduler.scheduled(), vec![Duration::from_millis(800)]);
    }
}
