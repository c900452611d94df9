use axum::{extract::State, response::Response};
use servicedesk_adapters::{AppState, handlers};

use crate::{adapters::response_builder, error::ApiError, extractors::AdminUser};

pub async fn access_denied() -> Response {
    handlers::handle_access_denied(response_builder())
}

#[tracing::instrument(name = "Admin manage", skip_all, fields(user_id = %admin.0.user_id))]
pub async fn manage(State(state): State<AppState>, admin: AdminUser) -> Result<Response, ApiError> {
    Ok(handlers::handle_manage(&state, response_builder()).await?)
}

#[tracing::instrument(name = "Admin users", skip_all, fields(user_id = %admin.0.user_id))]
pub async fn manage_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_list_users(&state, response_builder()).await?)
}
