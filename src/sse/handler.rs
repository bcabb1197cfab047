//! SSE handler implementation.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use crate::metrics::SseMetrics;
use crate::notification::{Notification, Notifier, StoreEvent};
use crate::server::AppState;

/// Body of a `snapshot` event
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotPayload {
    pub subscriber_id: Uuid,
    pub notifications: Vec<Notification>,
}

#[tracing::instrument(name = "sse.connect", skip(state))]
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let notifier = state.notifier().clone();

    // Subscribe before taking the snapshot so no change falls in between
    let rx = notifier.subscribe();

    let stream = create_sse_stream(notifier, rx, state.shutdown.subscribe());

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(state.settings.server.sse_keep_alive_secs))
            .text("heartbeat"),
    )
}

fn create_sse_stream(
    notifier: Notifier,
    rx: broadcast::Receiver<StoreEvent>,
    shutdown: broadcast::Receiver<()>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let guard = SubscriberGuard::new();
    let subscriber_id = guard.id;

    feed_stream(guard, notifier, rx, shutdown).map(move |item| Ok(item.into_event(subscriber_id)))
}

/// One message on a subscriber's feed, before SSE framing
#[derive(Debug, Clone, PartialEq)]
enum FeedItem {
    /// Full list of active notifications
    Snapshot(Vec<Notification>),
    /// A single store change
    Change(StoreEvent),
}

impl FeedItem {
    fn into_event(self, subscriber_id: Uuid) -> Event {
        match self {
            FeedItem::Snapshot(notifications) => json_event(
                "snapshot",
                &SnapshotPayload {
                    subscriber_id,
                    notifications,
                },
            ),
            FeedItem::Change(event) => json_event(event.name(), &event),
        }
    }
}

/// Snapshot first, then every change; a lagging subscriber gets a fresh
/// snapshot in place of the changes it missed
fn feed_stream(
    guard: SubscriberGuard,
    notifier: Notifier,
    mut rx: broadcast::Receiver<StoreEvent>,
    mut shutdown: broadcast::Receiver<()>,
) -> impl Stream<Item = FeedItem> {
    async_stream::stream! {
        let subscriber_id = guard.id;
        let _guard = guard;

        yield FeedItem::Snapshot(notifier.list());

        loop {
            let received = tokio::select! {
                _ = shutdown.recv() => None,
                received = rx.recv() => Some(received),
            };
            let Some(received) = received else {
                tracing::debug!(subscriber_id = %subscriber_id, "Closing SSE stream for shutdown");
                break;
            };

            match received {
                Ok(event) => yield FeedItem::Change(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        subscriber_id = %subscriber_id,
                        skipped = skipped,
                        "SSE subscriber lagged, resending snapshot"
                    );
                    yield FeedItem::Snapshot(notifier.list());
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

fn json_event<T: Serialize>(name: &str, data: &T) -> Event {
    match serde_json::to_string(data) {
        Ok(json) => Event::default().event(name).data(json),
        Err(e) => {
            tracing::error!(error = %e, event = name, "Failed to serialize SSE event");
            Event::default()
                .event("error")
                .data(r#"{"code":"SERIALIZATION_ERROR"}"#)
        }
    }
}

/// Tracks one open stream; logs and updates metrics when it ends
struct SubscriberGuard {
    id: Uuid,
    opened_at: Instant,
}

impl SubscriberGuard {
    fn new() -> Self {
        let id = Uuid::new_v4();
        SseMetrics::record_opened();
        tracing::info!(subscriber_id = %id, "SSE subscriber connected");
        Self {
            id,
            opened_at: Instant::now(),
        }
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        SseMetrics::record_closed();
        tracing::info!(
            subscriber_id = %self.id,
            duration_secs = self.opened_at.elapsed().as_secs_f64(),
            "SSE subscriber disconnected"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notification::{Kind, NotificationStore, TokioScheduler};

    fn notifier_with_buffer(capacity: usize) -> Notifier {
        let scheduler = Arc::new(TokioScheduler::try_current().unwrap());
        Notifier::new(Arc::new(NotificationStore::with_event_buffer(capacity)), scheduler)
    }

    #[test]
    fn test_snapshot_payload_serialization() {
        let payload = SnapshotPayload {
            subscriber_id: Uuid::nil(),
            notifications: vec![],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""notifications":[]"#));
    }

    #[tokio::test]
    async fn test_stream_starts_with_snapshot_then_follows_changes() {
        let notifier = notifier_with_buffer(16);
        notifier.info("before", Some(0));

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let rx = notifier.subscribe();
        let stream = feed_stream(SubscriberGuard::new(), notifier.clone(), rx, shutdown_rx);
        futures::pin_mut!(stream);

        assert_eq!(
            stream.next().await,
            Some(FeedItem::Snapshot(notifier.list()))
        );

        let added = notifier.add_notification("after", Kind::Success, Some(0));
        assert_eq!(
            stream.next().await,
            Some(FeedItem::Change(StoreEvent::Added { notification: added }))
        );
        assert_eq!(notifier.subscriber_count(), 1);

        shutdown_tx.send(()).unwrap();
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_gets_fresh_snapshot() {
        let notifier = notifier_with_buffer(1);

        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let rx = notifier.subscribe();
        let stream = feed_stream(SubscriberGuard::new(), notifier.clone(), rx, shutdown_rx);
        futures::pin_mut!(stream);

        assert_eq!(stream.next().await, Some(FeedItem::Snapshot(vec![])));

        // Overflow the one-slot feed before the stream polls again
        let first = notifier.info("first", Some(0));
        notifier.info("second", Some(0));
        notifier.info("third", Some(0));
        notifier.remove(first);

        let current = notifier.list();
        assert_eq!(current.len(), 2);
        assert_eq!(stream.next().await, Some(FeedItem::Snapshot(current)));
    }
}
