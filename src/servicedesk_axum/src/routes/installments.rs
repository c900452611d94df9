use axum::{Json, extract::State, response::Response};
use servicedesk_adapters::{
    AppState,
    handlers::{self, InstallmentsRequest},
};

use crate::{adapters::response_builder, error::ApiError};

#[tracing::instrument(name = "Check installments", skip_all, fields(price = %request.price))]
pub async fn installments(
    State(state): State<AppState>,
    Json(request): Json<InstallmentsRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_installments(&state, request, response_builder()).await?)
}
