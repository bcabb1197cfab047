//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod notifications;
mod routes;
mod session;

pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use notifications::{
    clear_notifications, create_notification, dismiss_notification, list_notifications,
    ClearResponse, CreateNotificationRequest, CreateNotificationResponse,
    NotificationListResponse, MAX_MESSAGE_LEN,
};
pub use routes::api_routes;
pub use session::logout;
