use axum::{Json, extract::State, response::Response};
use servicedesk_adapters::{
    AppState,
    handlers::{self, UpdateProfileRequest},
};

use crate::{adapters::response_builder, error::ApiError, extractors::CurrentUser};

#[tracing::instrument(name = "Get profile", skip_all, fields(user_id = %user.user_id))]
pub async fn profile(State(state): State<AppState>, user: CurrentUser) -> Result<Response, ApiError> {
    Ok(handlers::handle_get_profile(&state, &user.user_id, response_builder()).await?)
}

#[tracing::instrument(name = "Update profile", skip_all, fields(user_id = %user.user_id))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_update_profile(&state, &user.user_id, request, response_builder()).await?)
}

#[tracing::instrument(name = "Resend confirmation", skip_all, fields(user_id = %user.user_id))]
pub async fn resend_confirmation(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_resend_confirmation(&state, &user.user_id, response_builder()).await?)
}
