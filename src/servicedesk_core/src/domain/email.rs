use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Email address is required")]
    Empty,
    #[error("Email address is too long")]
    TooLong,
    #[error("Invalid email address")]
    Invalid,
}

/// A syntactically valid email address.
///
/// Equality and hashing are case-insensitive so the address can be used as a
/// lookup key the same way the user store compares it.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    /// Lowercased form used for uniqueness checks.
    pub fn normalized(&self) -> String {
        self.0.expose_secret().to_lowercase()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(Secret::new(trimmed.to_owned())))
    }
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(Secret::new(value.to_owned()))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .expose_secret()
            .eq_ignore_ascii_case(other.0.expose_secret())
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}
