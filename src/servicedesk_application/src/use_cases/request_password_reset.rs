use servicedesk_core::{Email, EmailSender, LinkGenerator, TokenProvider, TokenPurpose, UserStore};

use crate::{error::AccountError, notifications::send_token_link};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordResetRequestOutcome {
    UnknownEmail,
    Sent,
}

impl PasswordResetRequestOutcome {
    pub fn status_message(&self) -> &'static str {
        match self {
            PasswordResetRequestOutcome::UnknownEmail => {
                "No user is associated with this email address."
            }
            PasswordResetRequestOutcome::Sent => {
                "Password reset instructions have been sent to your email."
            }
        }
    }
}

/// First phase of a password reset: mail a reset link.
pub struct RequestPasswordResetUseCase<'a, U, T, L, E>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
    L: LinkGenerator + ?Sized,
    E: EmailSender + ?Sized,
{
    user_store: &'a U,
    token_provider: &'a T,
    link_generator: &'a L,
    email_sender: &'a E,
}

impl<'a, U, T, L, E> RequestPasswordResetUseCase<'a, U, T, L, E>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
    L: LinkGenerator + ?Sized,
    E: EmailSender + ?Sized,
{
    pub fn new(
        user_store: &'a U,
        token_provider: &'a T,
        link_generator: &'a L,
        email_sender: &'a E,
    ) -> Self {
        Self {
            user_store,
            token_provider,
            link_generator,
            email_sender,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self, email))]
    pub async fn execute(
        &self,
        email: &Email,
    ) -> Result<PasswordResetRequestOutcome, AccountError> {
        let Some(user) = self.user_store.find_by_email(email).await? else {
            return Ok(PasswordResetRequestOutcome::UnknownEmail);
        };
        send_token_link(
            self.token_provider,
            self.link_generator,
            self.email_sender,
            &user,
            TokenPurpose::PasswordReset,
        )
        .await?;
        Ok(PasswordResetRequestOutcome::Sent)
    }
}
