use axum::{Json, extract::State, response::Response};
use servicedesk_adapters::{
    AppState,
    handlers::{self, UpdatePasswordRequest},
};

use crate::{adapters::response_builder, error::ApiError, extractors::CurrentUser};

#[tracing::instrument(name = "Update password", skip_all, fields(user_id = %user.user_id))]
pub async fn update_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_update_password(&state, user.session, request, response_builder()).await?)
}
