use std::sync::Arc;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::metrics::SessionMetrics;
use crate::notification::{use_notifications, NotificationId};

use super::TokenRevoker;

/// Result of a logout attempt
#[derive(Debug, Clone, Serialize)]
pub struct LogoutOutcome {
    /// Whether the token was revoked
    pub revoked: bool,
    /// Where the client should go next
    pub redirect_url: String,
    /// Notification that reported the outcome
    pub notification_id: NotificationId,
}

/// Revokes a session and tells the user how it went.
///
/// Must run inside a `NotificationProvider` scope.
pub struct LogoutFlow {
    revoker: Arc<dyn TokenRevoker>,
    redirect_url: String,
}

impl LogoutFlow {
    pub fn new(revoker: Arc<dyn TokenRevoker>, redirect_url: impl Into<String>) -> Self {
        Self {
            revoker,
            redirect_url: redirect_url.into(),
        }
    }

    #[tracing::instrument(name = "session.logout", skip(self, token))]
    pub async fn execute(&self, token: &str) -> Result<LogoutOutcome> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Validation("session token is required".to_string()));
        }

        let notifier = use_notifications();

        let (revoked, notification_id) = match self.revoker.revoke(token).await {
            Ok(()) => {
                tracing::info!("Session revoked");
                (true, notifier.success("You have been logged out", None))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session revocation failed");
                (false, notifier.error(format!("Logout failed: {e}"), None))
            }
        };
        SessionMetrics::record_logout(revoked);

        Ok(LogoutOutcome {
            revoked,
            redirect_url: self.redirect_url.clone(),
            notification_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::notification::{
        Kind, NotificationProvider, NotificationStore, Notifier, TokioScheduler,
    };
    use crate::session::{RevokeError, SessionRevocationList};

    struct DownRevoker;

    #[async_trait]
    impl TokenRevoker for DownRevoker {
        async fn revoke(&self, _token: &str) -> std::result::Result<(), RevokeError> {
            Err(RevokeError::Unavailable("connection refused".to_string()))
        }
    }

    fn provider() -> NotificationProvider {
        let scheduler = Arc::new(TokioScheduler::try_current().unwrap());
        NotificationProvider::new(Notifier::new(Arc::new(NotificationStore::new()), scheduler))
    }

    #[tokio::test]
    async fn test_successful_logout_reports_success() {
        let provider = provider();
        let flow = LogoutFlow::new(Arc::new(SessionRevocationList::new()), "/login");

        let outcome = provider.scope(flow.execute("session-abc")).await.unwrap();

        assert!(outcome.revoked);
        assert_eq!(outcome.redirect_url, "/login");
        let list = provider.notifier().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, Kind::Success);
        assert_eq!(list[0].id, outcome.notification_id);
    }

    #[tokio::test]
    async fn test_failed_revocation_reports_error() {
        let provider = provider();
        let flow = LogoutFlow::new(Arc::new(DownRevoker), "/login");

        let outcome = provider.scope(flow.execute("session-abc")).await.unwrap();

        assert!(!outcome.revoked);
        let list = provider.notifier().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, Kind::Error);
        assert!(list[0].message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_token_rejected_without_notification() {
        let provider = provider();
        let flow = LogoutFlow::new(Arc::new(SessionRevocationList::new()), "/login");

        let result = provider.scope(flow.execute("   ")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(provider.notifier().is_empty());
    }
}
