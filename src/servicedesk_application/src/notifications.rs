//! Confirmation and reset emails sent by the workflow.

use servicedesk_core::{
    EmailMessage, EmailSender, LinkGenerator, TokenProvider, TokenPurpose, User, encode_token,
};

use crate::error::AccountError;

pub const CONFIRM_EMAIL_SUBJECT: &str = "Confirm Your Email";
pub const RESET_PASSWORD_SUBJECT: &str = "Reset Password";

pub fn confirmation_body(callback_url: &str) -> String {
    format!(
        "Please confirm your account by <a href='{}'>click here</a>",
        html_escape::encode_single_quoted_attribute(callback_url)
    )
}

pub fn reset_body(callback_url: &str) -> String {
    format!(
        "Please reset your password by clicking <a href='{}'>Here!</a>",
        html_escape::encode_single_quoted_attribute(callback_url)
    )
}

/// Issues a fresh token for `purpose` and mails the callback link to the
/// user's current address.
#[tracing::instrument(
    name = "send_token_link",
    skip(token_provider, link_generator, email_sender, user),
    fields(user_id = %user.id())
)]
pub async fn send_token_link<T, L, E>(
    token_provider: &T,
    link_generator: &L,
    email_sender: &E,
    user: &User,
    purpose: TokenPurpose,
) -> Result<(), AccountError>
where
    T: TokenProvider + ?Sized,
    L: LinkGenerator + ?Sized,
    E: EmailSender + ?Sized,
{
    let token = token_provider.generate_token(user.id(), purpose).await?;
    let code = encode_token(&token);
    let callback_url = link_generator.callback_link(purpose, user.id(), &code);

    let (subject, body) = match purpose {
        TokenPurpose::EmailConfirmation => (CONFIRM_EMAIL_SUBJECT, confirmation_body(&callback_url)),
        TokenPurpose::PasswordReset => (RESET_PASSWORD_SUBJECT, reset_body(&callback_url)),
    };

    let message = EmailMessage::to(user.email().clone(), subject, body);
    email_sender.send(&message).await?;
    Ok(())
}
