use secrecy::Secret;
use servicedesk_core::{Password, UserId, UserStore};

use crate::error::AccountError;

/// Change password use case - replaces the credential after checking the
/// current one.
pub struct ChangePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> ChangePasswordUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, old_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: &UserId,
        old_password: &Secret<String>,
        new_password: Password,
    ) -> Result<(), AccountError> {
        if !self.user_store.check_password(user_id, old_password).await? {
            return Err(AccountError::CredentialMismatch);
        }
        self.user_store
            .set_new_password(user_id, new_password)
            .await?;
        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
