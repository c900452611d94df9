use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use servicedesk_adapters::{
    AppState,
    handlers::{self, ConfirmResetQuery, ConfirmResetRequest, ResetPasswordRequest},
};

use crate::{adapters::response_builder, error::ApiError};

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_reset_password(&state, request, response_builder()).await?)
}

#[tracing::instrument(name = "Confirm reset password form", skip_all)]
pub async fn confirm_reset_password_form(
    Query(query): Query<ConfirmResetQuery>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_confirm_reset_form(query, response_builder()).await?)
}

#[tracing::instrument(name = "Confirm reset password", skip_all)]
pub async fn confirm_reset_password(
    State(state): State<AppState>,
    Json(request): Json<ConfirmResetRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_confirm_reset_password(&state, request, response_builder()).await?)
}
