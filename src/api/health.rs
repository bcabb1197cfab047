//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::notification::NotifierStats;
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub notifications: NotifierStats,
    pub sse_subscribers: usize,
    pub revoked_sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let notifier = state.notifier();

    Json(StatsResponse {
        notifications: notifier.stats(),
        sse_subscribers: notifier.subscriber_count(),
        revoked_sessions: state.revocations.len(),
    })
}
