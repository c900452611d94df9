use serde::Deserialize;
use servicedesk_application::{AccountError, ConfirmEmailOutcome, ConfirmEmailUseCase};
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers};

use crate::{config::paths, handlers::HandlerError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailQuery {
    pub user_id: Option<String>,
    pub code: Option<String>,
}

pub async fn handle_confirm_email<B>(
    state: &AppState,
    query: ConfirmEmailQuery,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let use_case = ConfirmEmailUseCase::new(&*state.user_store, &*state.token_provider);
    let outcome = use_case
        .execute(query.user_id.as_deref(), query.code.as_deref())
        .await
        .map_err(|e| match e {
            AccountError::UserNotFound => {
                HandlerError::UserNotLoaded(query.user_id.clone().unwrap_or_default())
            }
            other => other.into(),
        })?;

    match outcome {
        ConfirmEmailOutcome::MissingParameters => Ok(builder.see_other(paths::HOME, None)),
        outcome => Ok(builder.ok_json(serde_json::json!({
            "succeeded": outcome == ConfirmEmailOutcome::Confirmed,
            "message": outcome.status_message(),
        }))),
    }
}
