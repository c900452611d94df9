use std::sync::Arc;

use chrono::{DateTime, Utc};
use redis::{Commands, Connection};
use servicedesk_core::{BannedTokenStore, BannedTokenStoreError, UserId};
use tokio::sync::RwLock;

/// Banned session tokens, kept until the longest session they could belong to
/// has expired.
#[derive(Clone)]
pub struct RedisBannedTokenStore {
    conn: Arc<RwLock<Connection>>,
    token_ttl: u64,
}

impl RedisBannedTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>, token_ttl: u64) -> Self {
        Self { conn, token_ttl }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(name = "Banning session token", skip_all)]
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        let key = get_key(&token);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, self.token_ttl)
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }

    #[tracing::instrument(name = "Revoking all sessions of a user", skip_all)]
    async fn revoke_sessions_before(
        &self,
        user_id: &UserId,
        before: DateTime<Utc>,
    ) -> Result<(), BannedTokenStoreError> {
        let key = get_revocation_key(user_id);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, before.timestamp(), self.token_ttl)
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn sessions_revoked_before(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, BannedTokenStoreError> {
        let key = get_revocation_key(user_id);
        let mut conn = self.conn.write().await;
        let timestamp: Option<i64> = conn
            .get(&key)
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))?;
        Ok(timestamp.and_then(|secs| DateTime::from_timestamp(secs, 0)))
    }
}

const BANNED_TOKEN_KEY_PREFIX: &str = "servicedesk:banned_token:";
const REVOKED_SESSIONS_KEY_PREFIX: &str = "servicedesk:sessions_revoked_before:";

fn get_key(token: &str) -> String {
    format!("{}{}", BANNED_TOKEN_KEY_PREFIX, token)
}

fn get_revocation_key(user_id: &UserId) -> String {
    format!("{}{}", REVOKED_SESSIONS_KEY_PREFIX, user_id)
}
