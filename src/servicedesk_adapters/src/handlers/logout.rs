use servicedesk_application::LogoutUseCase;
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers};

use crate::{config::paths, handlers::HandlerError, session::AuthenticatedSession, state::AppState};

/// Revokes the session token and clears the cookie.
pub async fn handle_logout<B>(
    state: &AppState,
    session: AuthenticatedSession,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    sign_out(state, session).await?;
    Ok(builder
        .cookie(&state.sessions.removal_cookie().to_string())
        .see_other(paths::HOME, None))
}

pub(crate) async fn sign_out(
    state: &AppState,
    session: AuthenticatedSession,
) -> Result<(), HandlerError> {
    LogoutUseCase::new(&*state.banned_token_store)
        .execute(session.token)
        .await?;
    Ok(())
}
