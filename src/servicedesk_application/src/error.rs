use servicedesk_core::{
    BannedTokenStoreError, EmailSenderError, RoleStoreError, TokenProviderError, UserStoreError,
};
use thiserror::Error;

/// A validation failure attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the account workflow.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Username is already taken.")]
    DuplicateUsername,
    #[error("Email is already taken.")]
    DuplicateEmail,
    #[error("User not found.")]
    UserNotFound,
    #[error("Invalid token.")]
    TokenInvalidOrExpired,
    #[error("Incorrect password.")]
    CredentialMismatch,
    #[error("{}", .0.join("<br>"))]
    ResetPasswordFailed(Vec<String>),
    #[error("Persistence error: {0}")]
    UnknownPersistenceError(String),
    #[error("Notification error: {0}")]
    Notification(String),
}

impl AccountError {
    /// Field the error belongs to, for errors tied to a single input.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AccountError::DuplicateUsername => Some("userName"),
            AccountError::DuplicateEmail => Some("email"),
            AccountError::CredentialMismatch => Some("oldPassword"),
            _ => None,
        }
    }
}

impl PartialEq for AccountError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::ResetPasswordFailed(a), Self::ResetPasswordFailed(b)) => a == b,
            (Self::UnknownPersistenceError(_), Self::UnknownPersistenceError(_)) => true,
            (Self::Notification(_), Self::Notification(_)) => true,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl From<UserStoreError> for AccountError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateUsername => AccountError::DuplicateUsername,
            UserStoreError::DuplicateEmail => AccountError::DuplicateEmail,
            UserStoreError::UserNotFound => AccountError::UserNotFound,
            UserStoreError::UnexpectedError(e) => AccountError::UnknownPersistenceError(e),
        }
    }
}

impl From<RoleStoreError> for AccountError {
    fn from(error: RoleStoreError) -> Self {
        AccountError::UnknownPersistenceError(error.to_string())
    }
}

impl From<TokenProviderError> for AccountError {
    fn from(error: TokenProviderError) -> Self {
        AccountError::UnknownPersistenceError(error.to_string())
    }
}

impl From<BannedTokenStoreError> for AccountError {
    fn from(error: BannedTokenStoreError) -> Self {
        AccountError::UnknownPersistenceError(error.to_string())
    }
}

impl From<EmailSenderError> for AccountError {
    fn from(error: EmailSenderError) -> Self {
        AccountError::Notification(error.to_string())
    }
}
