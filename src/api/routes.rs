use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::server::middleware::{api_key_auth, provide_notifications};
use crate::server::AppState;

use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::notifications::{
    clear_notifications, create_notification, dismiss_notification, list_notifications,
};
use super::session::logout;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health, stats & metrics
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        .nest(
            "/api/v1",
            Router::new()
                .route(
                    "/notifications",
                    get(list_notifications)
                        .post(create_notification)
                        .delete(clear_notifications),
                )
                .route("/notifications/{id}", delete(dismiss_notification))
                .route("/session/logout", post(logout))
                // Outermost layer runs first: authenticate, then provide
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    provide_notifications,
                ))
                .route_layer(middleware::from_fn_with_state(state, api_key_auth)),
        )
}
