use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

/// Password rules applied to new credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            require_uppercase: false,
            require_lowercase: false,
            require_digit: true,
            min_length: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordViolation {
    TooShort(usize),
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
}

impl std::fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordViolation::TooShort(min) => {
                write!(f, "Passwords must be at least {min} characters.")
            }
            PasswordViolation::MissingUppercase => {
                f.write_str("Passwords must have at least one uppercase ('A'-'Z').")
            }
            PasswordViolation::MissingLowercase => {
                f.write_str("Passwords must have at least one lowercase ('a'-'z').")
            }
            PasswordViolation::MissingDigit => {
                f.write_str("Passwords must have at least one digit ('0'-'9').")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("{}", join_violations(.violations))]
pub struct PasswordPolicyError {
    pub violations: Vec<PasswordViolation>,
}

fn join_violations(violations: &[PasswordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl PasswordPolicy {
    pub fn check(&self, candidate: &str) -> Vec<PasswordViolation> {
        let mut violations = Vec::new();
        if candidate.chars().count() < self.min_length {
            violations.push(PasswordViolation::TooShort(self.min_length));
        }
        if self.require_uppercase && !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PasswordViolation::MissingUppercase);
        }
        if self.require_lowercase && !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PasswordViolation::MissingLowercase);
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordViolation::MissingDigit);
        }
        violations
    }
}

/// A new credential that satisfied the password policy when it was parsed.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(value: Secret<String>, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let violations = policy.check(value.expose_secret());
        if violations.is_empty() {
            Ok(Self(value))
        } else {
            Err(PasswordPolicyError { violations })
        }
    }
}

/// Parses with the default policy.
impl TryFrom<Secret<String>> for Password {
    type Error = PasswordPolicyError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value, &PasswordPolicy::default())
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
