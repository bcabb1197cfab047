//! Session termination.
//!
//! Logging out revokes the session token through a [`TokenRevoker`] and
//! reports the outcome to the user as a notification. Talking to OAuth
//! providers is left to other `TokenRevoker` implementations.

mod logout;
mod revocation;

use async_trait::async_trait;
use thiserror::Error;

pub use logout::{LogoutFlow, LogoutOutcome};
pub use revocation::SessionRevocationList;

#[derive(Debug, Error)]
pub enum RevokeError {
    #[error("session token is already revoked")]
    AlreadyRevoked,

    #[error("revocation service unavailable: {0}")]
    Unavailable(String),
}

/// Invalidates session tokens
#[async_trait]
pub trait TokenRevoker: Send + Sync {
    async fn revoke(&self, token: &str) -> Result<(), RevokeError>;
}
