use servicedesk_core::{Role, TokenProvider, TokenPurpose, UserId, UserStore, decode_token};

use crate::error::AccountError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEmailOutcome {
    /// `userId` or `code` was not supplied.
    MissingParameters,
    Confirmed,
    Failed,
}

impl ConfirmEmailOutcome {
    pub fn status_message(&self) -> &'static str {
        match self {
            ConfirmEmailOutcome::Confirmed => "Thank you for confirming your e-mail.",
            _ => "Error confirming your e-mail.",
        }
    }
}

/// Confirm email use case - consumes the confirmation token and promotes
/// `Passive` accounts to `User`.
pub struct ConfirmEmailUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
{
    user_store: &'a U,
    token_provider: &'a T,
}

impl<'a, U, T> ConfirmEmailUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
{
    pub fn new(user_store: &'a U, token_provider: &'a T) -> Self {
        Self {
            user_store,
            token_provider,
        }
    }

    #[tracing::instrument(name = "ConfirmEmailUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        user_id: Option<&str>,
        code: Option<&str>,
    ) -> Result<ConfirmEmailOutcome, AccountError> {
        let (Some(user_id), Some(code)) = (user_id, code) else {
            return Ok(ConfirmEmailOutcome::MissingParameters);
        };

        let user_id: UserId = user_id.parse().map_err(|_| AccountError::UserNotFound)?;
        let mut user = self.user_store.get_user(&user_id).await?;

        let Ok(token) = decode_token(code) else {
            tracing::warn!("Undecodable confirmation code");
            return Ok(ConfirmEmailOutcome::Failed);
        };
        if !self
            .token_provider
            .validate_token(&user_id, TokenPurpose::EmailConfirmation, &token)
            .await?
        {
            return Ok(ConfirmEmailOutcome::Failed);
        }

        user.confirm_email();
        user.transition_role(Role::Passive, Role::User);
        self.user_store.update_user(&user).await?;

        Ok(ConfirmEmailOutcome::Confirmed)
    }
}
