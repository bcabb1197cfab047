use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default lifetime of a notification before it is removed automatically.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Unique identifier for a notification.
///
/// Identifiers are handed out by the store from a monotonic counter, so they
/// never collide and compare in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the identifier
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Neutral information (default)
    #[default]
    Info,
    /// An operation completed successfully
    Success,
    /// Something the user should be aware of
    Warning,
    /// An operation failed
    Error,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Success => "success",
            Kind::Warning => "warning",
            Kind::Error => "error",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user-facing message.
///
/// Notifications are never mutated once created; the store only ever adds
/// or removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: Kind,
    /// Lifetime in milliseconds, `0` keeps it until dismissed
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, message: String, kind: Kind, duration_ms: u64) -> Self {
        Self {
            id,
            message,
            kind,
            duration_ms,
            created_at: Utc::now(),
        }
    }

    /// Whether this notification is removed by a timer
    pub fn expires(&self) -> bool {
        self.duration_ms > 0
    }

    /// Delay after which the notification expires, if it does
    pub fn expiry_delay(&self) -> Option<Duration> {
        self.expires()
            .then(|| Duration::from_millis(self.duration_ms))
    }
}
