//! Prometheus metrics for the notification service.
//!
//! - Notification lifecycle (created by kind, removed by reason, active)
//! - SSE subscribers
//! - Logout outcomes

mod helpers;

pub use helpers::{encode_metrics, NotificationMetrics, SessionMetrics, SseMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "resume";

lazy_static! {
    /// Notifications added, by kind
    pub static ref NOTIFICATIONS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_created_total", METRIC_PREFIX),
        "Total notifications added to the store",
        &["kind"]
    ).unwrap();

    /// Notifications removed, by reason (expired, dismissed, cleared)
    pub static ref NOTIFICATIONS_REMOVED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_removed_total", METRIC_PREFIX),
        "Total notifications removed from the store",
        &["reason"]
    ).unwrap();

    /// Notifications currently held by the store
    pub static ref NOTIFICATIONS_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_notifications_active", METRIC_PREFIX),
        "Number of notifications currently in the store"
    ).unwrap();

    /// Open SSE streams
    pub static ref SSE_SUBSCRIBERS: IntGauge = register_int_gauge!(
        format!("{}_sse_subscribers", METRIC_PREFIX),
        "Number of open SSE notification streams"
    ).unwrap();

    /// Logout attempts, by outcome
    pub static ref LOGOUTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_logouts_total", METRIC_PREFIX),
        "Total logout attempts",
        &["outcome"]
    ).unwrap();
}
