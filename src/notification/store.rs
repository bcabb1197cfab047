//! Ordered in-memory collection of active notifications.
//!
//! Entries live in a `BTreeMap` keyed by their id behind a single lock. Ids
//! come from a counter advanced under that lock, so key order is creation
//! order. Every mutation publishes its change event before the lock is
//! released, so replaying the feed always reproduces the store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::metrics::NotificationMetrics;

use super::{Kind, Notification, NotificationId, RemovalReason, StoreEvent};

/// Default capacity of the change feed
pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Lifetime counters for a store
#[derive(Debug, Default)]
struct StoreStats {
    created: AtomicU64,
    expired: AtomicU64,
    dismissed: AtomicU64,
    cleared: AtomicU64,
}

/// Snapshot of store counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotifierStats {
    pub created: u64,
    pub expired: u64,
    pub dismissed: u64,
    pub cleared: u64,
    pub active: usize,
}

struct Entries {
    by_id: BTreeMap<NotificationId, Notification>,
    next_id: u64,
}

pub struct NotificationStore {
    entries: RwLock<Entries>,
    events: broadcast::Sender<StoreEvent>,
    stats: StoreStats,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::with_event_buffer(DEFAULT_EVENT_BUFFER)
    }

    pub fn with_event_buffer(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            entries: RwLock::new(Entries {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
            events,
            stats: StoreStats::default(),
        }
    }

    /// Append a new notification and return a copy of it
    pub fn insert(&self, message: String, kind: Kind, duration_ms: u64) -> Notification {
        let mut entries = self.entries.write();

        let id = NotificationId::from_raw(entries.next_id);
        entries.next_id += 1;
        let notification = Notification::new(id, message, kind, duration_ms);
        entries.by_id.insert(id, notification.clone());

        self.stats.created.fetch_add(1, Ordering::Relaxed);
        NotificationMetrics::record_created(kind);
        NotificationMetrics::set_active(entries.by_id.len());

        let _ = self.events.send(StoreEvent::Added {
            notification: notification.clone(),
        });
        drop(entries);

        tracing::debug!(
            notification_id = %id,
            kind = %kind,
            duration_ms = duration_ms,
            "Notification added"
        );

        notification
    }

    /// Remove a notification by id.
    ///
    /// Returns `false` without side effects when the id is not present.
    pub fn remove(&self, id: NotificationId, reason: RemovalReason) -> bool {
        let mut entries = self.entries.write();

        if entries.by_id.remove(&id).is_none() {
            drop(entries);
            tracing::trace!(notification_id = %id, reason = reason.as_str(), "Notification already gone");
            return false;
        }

        match reason {
            RemovalReason::Expired => self.stats.expired.fetch_add(1, Ordering::Relaxed),
            RemovalReason::Dismissed => self.stats.dismissed.fetch_add(1, Ordering::Relaxed),
        };
        NotificationMetrics::record_removed(reason.as_str());
        NotificationMetrics::set_active(entries.by_id.len());

        let _ = self.events.send(StoreEvent::Removed { id, reason });
        drop(entries);

        tracing::debug!(notification_id = %id, reason = reason.as_str(), "Notification removed");
        true
    }

    /// Drop every notification, returning how many were removed
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();

        let count = entries.by_id.len();
        entries.by_id.clear();

        self.stats.cleared.fetch_add(count as u64, Ordering::Relaxed);
        NotificationMetrics::record_removed_by("cleared", count as u64);
        NotificationMetrics::set_active(0);

        let _ = self.events.send(StoreEvent::Cleared { count });
        drop(entries);

        tracing::debug!(count = count, "Notification store cleared");
        count
    }

    /// Active notifications in creation order
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.read().by_id.values().cloned().collect()
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.entries.read().by_id.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().by_id.is_empty()
    }

    /// Receive every change made after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub fn stats(&self) -> NotifierStats {
        NotifierStats {
            created: self.stats.created.load(Ordering::Relaxed),
            expired: self.stats.expired.load(Ordering::Relaxed),
            dismissed: self.stats.dismissed.load(Ordering::Relaxed),
            cleared: self.stats.cleared.load(Ordering::Relaxed),
            active: self.len(),
        }
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}
