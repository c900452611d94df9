use axum::{Json, extract::State, response::Response};
use servicedesk_adapters::{
    AppState,
    handlers::{self, RegisterRequest},
};

use crate::{adapters::response_builder, error::ApiError};

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_register(&state, request, response_builder()).await?)
}
