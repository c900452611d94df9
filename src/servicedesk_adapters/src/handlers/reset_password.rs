use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use servicedesk_application::{
    RESET_PASSWORD_SUCCESS, RequestPasswordResetUseCase, ResetPasswordUseCase,
};
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers};

use crate::{
    handlers::{
        HandlerError,
        validation::{FieldErrors, PASSWORD_MISMATCH},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResetQuery {
    pub user_id: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResetRequest {
    pub user_id: String,
    pub code: String,
    pub new_password: Secret<String>,
    pub confirm_new_password: Secret<String>,
}

/// First phase: mail a reset link to the account owning the address.
pub async fn handle_reset_password<B>(
    state: &AppState,
    request: ResetPasswordRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let mut errors = FieldErrors::default();
    let email = errors.email("email", &request.email);
    errors.into_result()?;
    let Some(email) = email else {
        return Err(HandlerError::BadRequest);
    };

    let use_case = RequestPasswordResetUseCase::new(
        &*state.user_store,
        &*state.token_provider,
        &*state.link_generator,
        &*state.email_sender,
    );
    let outcome = use_case.execute(&email).await?;
    Ok(builder.ok_json(serde_json::json!({ "message": outcome.status_message() })))
}

/// Echoes the link parameters back for the new-password form.
pub async fn handle_confirm_reset_form<B>(
    query: ConfirmResetQuery,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    if !present(&query.user_id) || !present(&query.code) {
        return Err(HandlerError::BadRequest);
    }
    Ok(builder.ok_json(serde_json::json!({
        "userId": query.user_id,
        "code": query.code,
    })))
}

/// Second phase: consume the token and set the new credential.
pub async fn handle_confirm_reset_password<B>(
    state: &AppState,
    request: ConfirmResetRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let mut errors = FieldErrors::default();
    if request.new_password.expose_secret() != request.confirm_new_password.expose_secret() {
        errors.push("confirmNewPassword", PASSWORD_MISMATCH);
    }
    errors.into_result()?;

    let use_case = ResetPasswordUseCase::new(
        &*state.user_store,
        &*state.token_provider,
        &state.identity.password,
    );
    let user_id = use_case
        .execute(&request.user_id, &request.code, request.new_password)
        .await?;
    state.sessions.revoke_all(&user_id).await?;

    Ok(builder.ok_json(serde_json::json!({ "message": RESET_PASSWORD_SUCCESS })))
}
