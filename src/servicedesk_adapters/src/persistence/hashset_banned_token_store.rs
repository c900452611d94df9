use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use servicedesk_core::{BannedTokenStore, BannedTokenStoreError, UserId};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashSetBannedTokenStore {
    tokens: Arc<RwLock<HashSet<String>>>,
    revoked_before: Arc<RwLock<HashMap<UserId, DateTime<Utc>>>>,
}

impl HashSetBannedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for HashSetBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        self.tokens.write().await.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        Ok(self.tokens.read().await.contains(token))
    }

    async fn revoke_sessions_before(
        &self,
        user_id: &UserId,
        before: DateTime<Utc>,
    ) -> Result<(), BannedTokenStoreError> {
        let mut revoked = self.revoked_before.write().await;
        let entry = revoked.entry(*user_id).or_insert(before);
        *entry = (*entry).max(before);
        Ok(())
    }

    async fn sessions_revoked_before(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, BannedTokenStoreError> {
        Ok(self.revoked_before.read().await.get(user_id).copied())
    }
}
