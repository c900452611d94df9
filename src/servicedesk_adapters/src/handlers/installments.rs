use serde::Deserialize;
use servicedesk_application::CheckInstallmentsUseCase;
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers, Price};

use crate::{handlers::HandlerError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentsRequest {
    pub bin_number: String,
    pub price: Price,
}

pub async fn handle_installments<B>(
    state: &AppState,
    request: InstallmentsRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let use_case = CheckInstallmentsUseCase::new(&*state.payment_gateway, &state.payment_locale);
    let model = use_case.execute(&request.bin_number, request.price).await?;
    Ok(builder.ok_json(serde_json::json!(model)))
}
