use serde::Serialize;

use super::{Notification, NotificationId};

/// Why a notification left the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalReason {
    /// Its timer fired
    Expired,
    /// It was removed explicitly by id
    Dismissed,
}

impl RemovalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Expired => "expired",
            RemovalReason::Dismissed => "dismissed",
        }
    }
}

/// Change published to store subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreEvent {
    Added {
        notification: Notification,
    },
    Removed {
        id: NotificationId,
        reason: RemovalReason,
    },
    Cleared {
        count: usize,
    },
}

impl StoreEvent {
    /// SSE event name for this change
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::Added { .. } => "added",
            StoreEvent::Removed { .. } => "removed",
            StoreEvent::Cleared { .. } => "cleared",
        }
    }
}
