//! Single-purpose account tokens and their URL-safe transport encoding.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a confirmation/reset token may be used for. A token issued for one
/// purpose is never accepted for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenPurpose {
    EmailConfirmation,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailConfirmation => "email-confirmation",
            TokenPurpose::PasswordReset => "password-reset",
        }
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Token is not valid base64url")]
    InvalidEncoding,
    #[error("Token is not valid UTF-8")]
    InvalidUtf8,
}

/// Base64url-encodes the token's UTF-8 bytes so it can be embedded in a query string.
pub fn encode_token(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(token.as_bytes())
}

/// Reverses [`encode_token`]. Trailing `=` padding is tolerated.
pub fn decode_token(encoded: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|_| TokenError::InvalidEncoding)?;
    String::from_utf8(bytes).map_err(|_| TokenError::InvalidUtf8)
}
