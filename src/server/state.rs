use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::config::Settings;
use crate::notification::{NotificationProvider, Notifier};
use crate::session::{LogoutFlow, SessionRevocationList};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub provider: NotificationProvider,
    pub revocations: Arc<SessionRevocationList>,
    pub logout: Arc<LogoutFlow>,
    pub start_time: Instant,
    /// Fired once when the service starts shutting down
    pub shutdown: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(settings: Settings, notifier: Notifier) -> Self {
        let revocations = Arc::new(SessionRevocationList::new());
        let logout = Arc::new(LogoutFlow::new(
            revocations.clone(),
            settings.auth.logout_redirect_url.clone(),
        ));
        let (shutdown, _) = broadcast::channel(1);

        Self {
            settings: Arc::new(settings),
            provider: NotificationProvider::new(notifier),
            revocations,
            logout,
            start_time: Instant::now(),
            shutdown,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        self.provider.notifier()
    }
}
