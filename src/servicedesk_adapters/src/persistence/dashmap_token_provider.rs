use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use servicedesk_core::{Clock, TokenProvider, TokenProviderError, TokenPurpose, UserId};

use super::generate_raw_token;

struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// In-memory token provider. One live token per (user, purpose); issuing a
/// new one replaces the previous.
#[derive(Clone)]
pub struct DashMapTokenProvider {
    tokens: Arc<DashMap<(UserId, TokenPurpose), IssuedToken>>,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl DashMapTokenProvider {
    pub fn new(lifetime: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            lifetime,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl TokenProvider for DashMapTokenProvider {
    async fn generate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
    ) -> Result<String, TokenProviderError> {
        let token = generate_raw_token();
        self.tokens.insert(
            (*user_id, purpose),
            IssuedToken {
                token: token.clone(),
                expires_at: self.clock.now() + self.lifetime,
            },
        );
        Ok(token)
    }

    async fn validate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
        token: &str,
    ) -> Result<bool, TokenProviderError> {
        let now = self.clock.now();
        let key = (*user_id, purpose);
        // Expired entries are dropped whatever the candidate.
        self.tokens.remove_if(&key, |_, issued| issued.expires_at <= now);
        Ok(self
            .tokens
            .remove_if(&key, |_, issued| issued.token == token)
            .is_some())
    }
}
