use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{RevokeError, TokenRevoker};

/// In-process list of revoked session tokens
#[derive(Debug, Default)]
pub struct SessionRevocationList {
    revoked: DashMap<String, DateTime<Utc>>,
}

impl SessionRevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.revoked.contains_key(token)
    }

    /// When the token was revoked, if it was
    pub fn revoked_at(&self, token: &str) -> Option<DateTime<Utc>> {
        self.revoked.get(token).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

#[async_trait]
impl TokenRevoker for SessionRevocationList {
    async fn revoke(&self, token: &str) -> Result<(), RevokeError> {
        match self.revoked.entry(token.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(RevokeError::AlreadyRevoked),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Utc::now());
                Ok(())
            }
        }
    }
}
