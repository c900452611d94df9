use servicedesk_application::{AccountError, CheckInstallmentsError};
use thiserror::Error;

use crate::session::SessionError;

/// Failures a handler reports back to the web layer, which owns the mapping
/// to status codes.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Installments(#[from] CheckInstallmentsError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Unable to load user with ID '{0}'.")]
    UserNotLoaded(String),
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Bad request")]
    BadRequest,
}
