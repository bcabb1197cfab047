//! Server-Sent Events stream of notification store changes.
//!
//! This is the feed a rendering surface follows to show toasts. It is
//! read-only; dismissals go through the HTTP API.
//!
//! # Endpoint
//!
//! `GET /sse`
//!
//! # Event Types
//!
//! - `snapshot` - Full list of active notifications, sent first and again
//!   whenever the subscriber fell too far behind
//! - `added` - A notification was added
//! - `removed` - A notification expired or was dismissed
//! - `cleared` - The store was emptied
//! - `heartbeat` - Keep-alive comment

mod handler;

pub use handler::{sse_handler, SnapshotPayload};
