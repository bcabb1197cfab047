//! Session endpoints.

use axum::{extract::State, http::HeaderMap, Json};

use crate::error::{AppError, Result};
use crate::server::middleware::extract_bearer_token;
use crate::server::AppState;
use crate::session::LogoutOutcome;

/// POST /api/v1/session/logout - Revoke the bearer token and report the outcome
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutOutcome>> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    let outcome = state.logout.execute(token).await?;
    Ok(Json(outcome))
}
