//! Notification endpoints.
//!
//! These handlers run inside the notification provider and reach the store
//! through `use_notifications()`, like any other consumer.

use axum::{extract::Path, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::notification::{use_notifications, Kind, Notification, NotificationId};

/// Longest message accepted over HTTP, in characters
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub message: String,
    #[serde(default)]
    pub kind: Kind,
    /// Lifetime in milliseconds; omitted uses the default, 0 keeps it
    pub duration_ms: Option<u64>,
}

impl CreateNotificationRequest {
    fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(AppError::Validation("message must not be empty".to_string()));
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::Validation(format!(
                "message must be at most {} characters",
                MAX_MESSAGE_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNotificationResponse {
    pub id: NotificationId,
    pub notification: Notification,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// GET /api/v1/notifications - Active notifications in creation order
pub async fn list_notifications() -> Json<NotificationListResponse> {
    let notifications = use_notifications().list();
    let total = notifications.len();
    Json(NotificationListResponse {
        notifications,
        total,
    })
}

/// POST /api/v1/notifications - Add a notification
#[tracing::instrument(name = "http.create_notification", skip_all)]
pub async fn create_notification(
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<CreateNotificationResponse>)> {
    request.validate()?;

    let notification =
        use_notifications().add_notification(request.message, request.kind, request.duration_ms);

    Ok((
        StatusCode::CREATED,
        Json(CreateNotificationResponse {
            id: notification.id,
            notification,
        }),
    ))
}

/// DELETE /api/v1/notifications/{id} - Dismiss one notification
#[tracing::instrument(name = "http.dismiss_notification")]
pub async fn dismiss_notification(Path(id): Path<String>) -> Result<StatusCode> {
    let id: NotificationId = id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid notification id: {}", id)))?;

    if use_notifications().remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("notification {}", id)))
    }
}

/// DELETE /api/v1/notifications - Dismiss everything
#[tracing::instrument(name = "http.clear_notifications")]
pub async fn clear_notifications() -> Json<ClearResponse> {
    let cleared = use_notifications().clear();
    tracing::info!(cleared = cleared, "Notifications cleared");
    Json(ClearResponse { cleared })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            message: message.to_string(),
            kind: Kind::Info,
            duration_ms: None,
        }
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        assert!(matches!(request("  ").validate(), Err(AppError::Validation(_))));
        assert!(request("Resume uploaded").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_message() {
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(request(&long).validate().is_err());
        assert!(request(&"x".repeat(MAX_MESSAGE_LEN)).validate().is_ok());
    }

    #[test]
    fn test_request_defaults_kind() {
        let request: CreateNotificationRequest =
            serde_json::from_str(r#"{"message":"Saved"}"#).unwrap();
        assert_eq!(request.kind, Kind::Info);
        assert_eq!(request.duration_ms, None);
    }
}
