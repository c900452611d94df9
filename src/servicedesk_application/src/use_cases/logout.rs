use servicedesk_core::BannedTokenStore;

use crate::error::AccountError;

/// Logout use case - revokes the session token
pub struct LogoutUseCase<'a, B>
where
    B: BannedTokenStore + ?Sized,
{
    banned_token_store: &'a B,
}

impl<'a, B> LogoutUseCase<'a, B>
where
    B: BannedTokenStore + ?Sized,
{
    pub fn new(banned_token_store: &'a B) -> Self {
        Self { banned_token_store }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self, token))]
    pub async fn execute(&self, token: String) -> Result<(), AccountError> {
        self.banned_token_store.ban_token(token).await?;
        Ok(())
    }
}
