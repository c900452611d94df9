use servicedesk_core::{
    BinNumber, GatewayError, InstallmentError, InstallmentInfoRequest, InstallmentModel,
    PaymentGateway, Price,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CheckInstallmentsError {
    #[error(transparent)]
    Validation(#[from] InstallmentError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Looks up the installment options for a card BIN and price.
pub struct CheckInstallmentsUseCase<'a, P>
where
    P: PaymentGateway + ?Sized,
{
    gateway: &'a P,
    locale: &'a str,
}

impl<'a, P> CheckInstallmentsUseCase<'a, P>
where
    P: PaymentGateway + ?Sized,
{
    pub fn new(gateway: &'a P, locale: &'a str) -> Self {
        Self { gateway, locale }
    }

    /// Responses whose conversation id differs from the one sent are rejected
    /// whatever their status.
    #[tracing::instrument(name = "CheckInstallmentsUseCase::execute", skip(self, card_number))]
    pub async fn execute(
        &self,
        card_number: &str,
        price: Price,
    ) -> Result<InstallmentModel, CheckInstallmentsError> {
        let bin_number = BinNumber::parse(card_number)?;
        let conversation_id = uuid::Uuid::new_v4().simple().to_string();
        let request = InstallmentInfoRequest {
            locale: self.locale.to_string(),
            conversation_id: conversation_id.clone(),
            bin_number,
            price,
        };

        let response = self.gateway.retrieve_installment_info(&request).await?;

        if response.conversation_id.as_deref() != Some(conversation_id.as_str()) {
            tracing::error!(
                sent = %conversation_id,
                received = ?response.conversation_id,
                "Payment gateway conversation id mismatch"
            );
            return Err(GatewayError::IntegrityMismatch.into());
        }
        if response.is_failure() {
            return Err(GatewayError::Upstream {
                code: response.error_code,
                message: response
                    .error_message
                    .unwrap_or_else(|| "Unknown gateway error".to_string()),
            }
            .into());
        }
        if response.installment_details.is_empty() {
            return Err(GatewayError::EmptyResponse.into());
        }

        Ok(InstallmentModel {
            conversation_id,
            installment_details: response.installment_details,
        })
    }
}
