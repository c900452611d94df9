use secrecy::Secret;
use serde::Deserialize;
use servicedesk_application::ChangePasswordUseCase;
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers};

use crate::{
    config::paths,
    handlers::{HandlerError, logout::sign_out, validation::FieldErrors},
    session::AuthenticatedSession,
    state::AppState,
};

const PASSWORD_UPDATED: &str = "Password updated successfully.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
    pub confirm_password: Secret<String>,
}

/// Changes the credential, then signs the user out of every session so they
/// log in again with the new password.
pub async fn handle_update_password<B>(
    state: &AppState,
    session: AuthenticatedSession,
    request: UpdatePasswordRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let user_id = session.claims.user_id()?;

    let mut errors = FieldErrors::default();
    let new_password = errors.new_password(
        "newPassword",
        "confirmPassword",
        request.new_password,
        &request.confirm_password,
        &state.identity.password,
    );
    errors.into_result()?;
    let Some(new_password) = new_password else {
        return Err(HandlerError::BadRequest);
    };

    ChangePasswordUseCase::new(&*state.user_store)
        .execute(&user_id, &request.old_password, new_password)
        .await?;

    state.sessions.revoke_all(&user_id).await?;
    sign_out(state, session).await?;
    Ok(builder
        .cookie(&state.sessions.removal_cookie().to_string())
        .see_other(
            paths::LOGIN,
            Some(serde_json::json!({ "message": PASSWORD_UPDATED })),
        ))
}
