use secrecy::Secret;
use servicedesk_core::{
    Password, PasswordPolicy, TokenProvider, TokenPurpose, UserId, UserStore, decode_token,
};

use crate::error::AccountError;

pub const RESET_PASSWORD_SUCCESS: &str = "Your password has been reset.";
const INVALID_TOKEN: &str = "Invalid token.";

/// Second phase of a password reset: consume the token and set the new
/// credential.
pub struct ResetPasswordUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
{
    user_store: &'a U,
    token_provider: &'a T,
    policy: &'a PasswordPolicy,
}

impl<'a, U, T> ResetPasswordUseCase<'a, U, T>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
{
    pub fn new(user_store: &'a U, token_provider: &'a T, policy: &'a PasswordPolicy) -> Self {
        Self {
            user_store,
            token_provider,
            policy,
        }
    }

    /// The token is only checked, and so consumed, once the new password
    /// satisfies the policy. Returns the account whose credential changed.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, code, new_password))]
    pub async fn execute(
        &self,
        user_id: &str,
        code: &str,
        new_password: Secret<String>,
    ) -> Result<UserId, AccountError> {
        let user_id: UserId = user_id.parse().map_err(|_| AccountError::UserNotFound)?;
        self.user_store.get_user(&user_id).await?;

        let mut errors = Vec::new();
        let token = decode_token(code).ok();
        if token.is_none() {
            errors.push(INVALID_TOKEN.to_string());
        }
        let password = match Password::parse(new_password, self.policy) {
            Ok(password) => Some(password),
            Err(e) => {
                errors.extend(e.violations.iter().map(ToString::to_string));
                None
            }
        };

        let (Some(token), Some(password)) = (token, password) else {
            return Err(AccountError::ResetPasswordFailed(errors));
        };

        if !self
            .token_provider
            .validate_token(&user_id, TokenPurpose::PasswordReset, &token)
            .await?
        {
            return Err(AccountError::ResetPasswordFailed(vec![
                INVALID_TOKEN.to_string(),
            ]));
        }

        self.user_store.set_new_password(&user_id, password).await?;
        self.user_store.reset_access_failed(&user_id).await?;
        tracing::info!(user_id = %user_id, "Password reset");
        Ok(user_id)
    }
}
