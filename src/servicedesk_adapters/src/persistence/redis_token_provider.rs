use std::sync::Arc;

use redis::{Commands, Connection};
use servicedesk_core::{TokenProvider, TokenProviderError, TokenPurpose, UserId};
use tokio::sync::RwLock;

use super::generate_raw_token;

/// Token provider backed by Redis key expiry.
#[derive(Clone)]
pub struct RedisTokenProvider {
    conn: Arc<RwLock<Connection>>,
    lifetime_in_seconds: u64,
}

impl RedisTokenProvider {
    pub fn new(conn: Arc<RwLock<Connection>>, lifetime_in_seconds: u64) -> Self {
        Self {
            conn,
            lifetime_in_seconds,
        }
    }
}

#[async_trait::async_trait]
impl TokenProvider for RedisTokenProvider {
    #[tracing::instrument(name = "Issuing account token", skip(self))]
    async fn generate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
    ) -> Result<String, TokenProviderError> {
        let token = generate_raw_token();
        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(get_key(user_id, purpose), &token, self.lifetime_in_seconds)
            .map_err(|e| TokenProviderError::StoreError(e.to_string()))?;
        Ok(token)
    }

    #[tracing::instrument(name = "Validating account token", skip(self, token))]
    async fn validate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
        token: &str,
    ) -> Result<bool, TokenProviderError> {
        let key = get_key(user_id, purpose);
        // The write lock spans the read and the delete so a token is consumed once.
        let mut conn = self.conn.write().await;
        let stored: Option<String> = conn
            .get(&key)
            .map_err(|e| TokenProviderError::StoreError(e.to_string()))?;
        if stored.as_deref() != Some(token) {
            return Ok(false);
        }
        conn.del::<_, ()>(&key)
            .map_err(|e| TokenProviderError::StoreError(e.to_string()))?;
        Ok(true)
    }
}

const ACCOUNT_TOKEN_KEY_PREFIX: &str = "servicedesk:account_token:";

fn get_key(user_id: &UserId, purpose: TokenPurpose) -> String {
    format!("{ACCOUNT_TOKEN_KEY_PREFIX}{purpose}:{user_id}")
}
