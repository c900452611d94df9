use axum::{Json, extract::State, response::Response};
use servicedesk_adapters::{
    AppState,
    handlers::{self, LoginRequest},
};

use crate::{adapters::response_builder, error::ApiError};

#[tracing::instrument(name = "Login", skip_all, fields(user_name = %request.user_name))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_login(&state, request, response_builder()).await?)
}
