use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email_message::EmailMessage,
    installment::{GatewayError, InstallmentInfoRequest, InstallmentInfoResponse},
    token::TokenPurpose,
    user_id::UserId,
};

#[derive(Debug, Error)]
pub enum TokenProviderError {
    #[error("Token store error: {0}")]
    StoreError(String),
}

/// Issues and verifies single-use, purpose-bound codes for email links.
///
/// A code is only valid for the user and purpose it was issued for, expires
/// after the provider's lifetime and is consumed by a successful validation.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn generate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
    ) -> Result<String, TokenProviderError>;

    async fn validate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
        token: &str,
    ) -> Result<bool, TokenProviderError>;
}

#[derive(Debug, Error)]
pub enum EmailSenderError {
    #[error("Email could not be delivered: {0}")]
    DeliveryFailed(String),
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSenderError>;
}

/// Builds absolute callback URLs embedded in notification emails.
pub trait LinkGenerator: Send + Sync {
    fn callback_link(&self, purpose: TokenPurpose, user_id: &UserId, code: &str) -> String;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn retrieve_installment_info(
        &self,
        request: &InstallmentInfoRequest,
    ) -> Result<InstallmentInfoResponse, GatewayError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
