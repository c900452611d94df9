use thiserror::Error;

use crate::domain::email::Email;

#[derive(Debug, Error, PartialEq)]
pub enum EmailMessageError {
    #[error("An email message needs at least one recipient")]
    NoRecipients,
}

/// An outbound notification. Built by the workflow and handed to an
/// [`EmailSender`](crate::ports::services::EmailSender); never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    recipients: Vec<Email>,
    subject: String,
    body: String,
}

impl EmailMessage {
    pub fn new(
        recipients: Vec<Email>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, EmailMessageError> {
        if recipients.is_empty() {
            return Err(EmailMessageError::NoRecipients);
        }
        Ok(Self {
            recipients,
            subject: subject.into(),
            body: body.into(),
        })
    }

    pub fn to(recipient: Email, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipients: vec![recipient],
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn recipients(&self) -> &[Email] {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_recipients() {
        assert_eq!(
            EmailMessage::new(vec![], "subject", "body"),
            Err(EmailMessageError::NoRecipients)
        );
    }

    #[test]
    fn test_single_recipient() {
        let email = Email::try_from("a@x.com").unwrap();
        let message = EmailMessage::to(email.clone(), "Hello", "<b>hi</b>");
        assert_eq!(message.recipients(), &[email]);
        assert_eq!(message.subject(), "Hello");
        assert_eq!(message.body(), "<b>hi</b>");
    }
}
