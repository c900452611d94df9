use axum::{
    extract::{Query, State},
    response::Response,
};
use servicedesk_adapters::{
    AppState,
    handlers::{self, ConfirmEmailQuery},
};

use crate::{adapters::response_builder, error::ApiError};

#[tracing::instrument(name = "Confirm email", skip_all)]
pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> Result<Response, ApiError> {
    Ok(handlers::handle_confirm_email(&state, query, response_builder()).await?)
}
