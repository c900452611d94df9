use servicedesk_core::{LinkGenerator, TokenPurpose, UserId};
use url::Url;

use crate::config::paths;

/// Builds absolute callback links from the configured public origin.
#[derive(Debug, Clone)]
pub struct BaseUrlLinkGenerator {
    base_url: Url,
}

impl BaseUrlLinkGenerator {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }
}

fn callback_path(purpose: TokenPurpose) -> &'static str {
    match purpose {
        TokenPurpose::EmailConfirmation => paths::CONFIRM_EMAIL,
        TokenPurpose::PasswordReset => paths::CONFIRM_RESET_PASSWORD,
    }
}

impl LinkGenerator for BaseUrlLinkGenerator {
    fn callback_link(&self, purpose: TokenPurpose, user_id: &UserId, code: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_path(callback_path(purpose));
        url.query_pairs_mut()
            .clear()
            .append_pair("userId", &user_id.to_string())
            .append_pair("code", code);
        url.into()
    }
}
