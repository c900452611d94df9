use secrecy::Secret;
use serde::Deserialize;
use servicedesk_application::LoginUseCase;
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers, SignInResult};

use crate::{config::paths, handlers::HandlerError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: Secret<String>,
    #[serde(default)]
    pub remember_me: bool,
}

/// Unknown users, wrong passwords and locked accounts all get the same answer.
pub async fn handle_login<B>(
    state: &AppState,
    request: LoginRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let use_case = LoginUseCase::new(&*state.user_store, &*state.clock, &state.identity.lockout);

    match use_case.execute(&request.user_name, &request.password).await? {
        SignInResult::Succeeded(user_id) => {
            let cookie = state.sessions.issue(&user_id, request.remember_me)?;
            Ok(builder
                .cookie(&cookie.to_string())
                .see_other(paths::HOME, None))
        }
        SignInResult::Failed | SignInResult::LockedOut => Err(HandlerError::InvalidCredentials),
    }
}
