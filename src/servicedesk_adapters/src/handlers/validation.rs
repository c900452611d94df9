//! Input checks shared by the account handlers. Every failing field is
//! reported at once.

use secrecy::{ExposeSecret, Secret};
use servicedesk_application::{AccountError, FieldError};
use servicedesk_core::{Email, Password, PasswordPolicy, Username};

pub(crate) const PASSWORD_MISMATCH: &str = "The password and confirmation password do not match.";

#[derive(Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn required(&mut self, field: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, format!("The {field} field is required."));
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    pub fn username(&mut self, field: &str, value: &str) -> Option<Username> {
        Username::parse(value)
            .map_err(|e| self.push(field, e.to_string()))
            .ok()
    }

    pub fn email(&mut self, field: &str, value: &str) -> Option<Email> {
        Email::try_from(value)
            .map_err(|e| self.push(field, e.to_string()))
            .ok()
    }

    /// Policy check plus confirmation match.
    pub fn new_password(
        &mut self,
        field: &str,
        confirm_field: &str,
        password: Secret<String>,
        confirmation: &Secret<String>,
        policy: &PasswordPolicy,
    ) -> Option<Password> {
        if password.expose_secret() != confirmation.expose_secret() {
            self.push(confirm_field, PASSWORD_MISMATCH);
        }
        match Password::parse(password, policy) {
            Ok(password) => Some(password),
            Err(e) => {
                for violation in e.violations {
                    self.push(field, violation.to_string());
                }
                None
            }
        }
    }

    pub fn into_result(self) -> Result<(), AccountError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AccountError::Validation(self.0))
        }
    }
}
