use servicedesk_core::{EmailSender, LinkGenerator, TokenProvider, TokenPurpose, UserId, UserStore};

use crate::{error::AccountError, notifications::send_token_link};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendConfirmationOutcome {
    Sent,
    AlreadyConfirmed,
}

impl ResendConfirmationOutcome {
    pub fn status_message(&self) -> &'static str {
        match self {
            ResendConfirmationOutcome::Sent => {
                "Verification email sent. Please check your email."
            }
            ResendConfirmationOutcome::AlreadyConfirmed => "Your email is already confirmed.",
        }
    }
}

/// Sends a fresh confirmation link to an account whose email is unconfirmed.
pub struct ResendConfirmationUseCase<'a, U, T, L, E>
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

impl<'a, U, T, L, E> ResendConfirmationUseCase<'a, U, T, L, E>
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

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: &UserId,
    ) -> Result<ResendConfirmationOutcome, AccountError> {
        let user = self.user_store.get_user(user_id).await?;
        if user.email_confirmed() {
            return Ok(ResendConfirmationOutcome::AlreadyConfirmed);
        }
        send_token_link(
            self.token_provider,
            self.link_generator,
            self.email_sender,
            &user,
            TokenPurpose::EmailConfirmation,
        )
        .await?;
        Ok(ResendConfirmationOutcome::Sent)
    }
}
