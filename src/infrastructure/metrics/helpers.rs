//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use crate::notification::Kind;

use super::{
    LOGOUTS_TOTAL, NOTIFICATIONS_ACTIVE, NOTIFICATIONS_CREATED_TOTAL, NOTIFICATIONS_REMOVED_TOTAL,
    SSE_SUBSCRIBERS,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording store metrics
pub struct NotificationMetrics;

impl NotificationMetrics {
    pub fn record_created(kind: Kind) {
        NOTIFICATIONS_CREATED_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn record_removed(reason: &str) {
        Self::record_removed_by(reason, 1);
    }

    pub fn record_removed_by(reason: &str, count: u64) {
        if count > 0 {
            NOTIFICATIONS_REMOVED_TOTAL
                .with_label_values(&[reason])
                .inc_by(count);
        }
    }

    pub fn set_active(count: usize) {
        NOTIFICATIONS_ACTIVE.set(count as i64);
    }
}

/// Helper struct for recording SSE stream metrics
pub struct SseMetrics;

impl SseMetrics {
    pub fn record_opened() {
        SSE_SUBSCRIBERS.inc();
    }

    pub fn record_closed() {
        SSE_SUBSCRIBERS.dec();
    }
}

/// Helper struct for recording logout outcomes
pub struct SessionMetrics;

impl SessionMetrics {
    pub fn record_logout(success: bool) {
        let outcome = if success { "success" } else { "failure" };
        LOGOUTS_TOTAL.with_label_values(&[outcome]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_metrics() {
        NotificationMetrics::record_created(Kind::Success);
        NotificationMetrics::record_removed("expired");
        NotificationMetrics::record_removed_by("cleared", 0);
        NotificationMetrics::set_active(3);
        // Just verify no panics
    }

    #[test]
    fn test_encode_metrics_contains_prefix() {
        NotificationMetrics::record_created(Kind::Info);
        let output = encode_metrics().unwrap();
        assert!(output.contains("resume_notifications_created_total"));
    }

    #[test]
    fn test_sse_and_session_metrics() {
        SseMetrics::record_opened();
        SseMetrics::record_closed();
        SessionMetrics::record_logout(true);
        SessionMetrics::record_logout(false);
        // Just verify no panics
    }
}
