use serde::{Deserialize, Serialize};
use thiserror::Error;

const ALLOWED_SPECIAL_CHARACTERS: &str = "-._@+";
const MAX_USERNAME_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq)]
pub enum UsernameError {
    #[error("Username is required")]
    Empty,
    #[error("Username must be at most {MAX_USERNAME_LENGTH} characters")]
    TooLong,
    #[error("Username contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// Account login name. Only ASCII letters, digits and `-._@+` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn parse(value: &str) -> Result<Self, UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }
        if value.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UsernameError::TooLong);
        }
        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !ALLOWED_SPECIAL_CHARACTERS.contains(*c))
        {
            return Err(UsernameError::InvalidCharacter(c));
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for uniqueness checks.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
