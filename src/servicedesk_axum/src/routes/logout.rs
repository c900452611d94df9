use axum::{extract::State, response::Response};
use servicedesk_adapters::{AppState, handlers};

use crate::{adapters::response_builder, error::ApiError, extractors::CurrentUser};

#[tracing::instrument(name = "Logout", skip_all, fields(user_id = %user.user_id))]
pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> Result<Response, ApiError> {
    Ok(handlers::handle_logout(&state, user.session, response_builder()).await?)
}
