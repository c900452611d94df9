//! Session extractors for protected routes.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use servicedesk_adapters::{AppState, AuthenticatedSession, config::paths};
use servicedesk_application::AuthorizeRoleUseCase;
use servicedesk_core::{Role, SessionValidator, UserId};

use crate::error::ApiError;

/// The signed-in user. Requests without a valid session are redirected to
/// the login page.
pub struct CurrentUser {
    pub user_id: UserId,
    pub session: AuthenticatedSession,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.sessions.validate(parts).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected session");
            Redirect::to(paths::LOGIN)
        })?;
        let user_id = session
            .claims
            .user_id()
            .map_err(|_| Redirect::to(paths::LOGIN))?;

        Ok(Self { user_id, session })
    }
}

/// A signed-in user holding `Admin`; anyone else is sent to the
/// access-denied page.
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let is_admin = AuthorizeRoleUseCase::new(&*state.user_store)
            .execute(&user.user_id, Role::Admin)
            .await
            .map_err(|e| ApiError::from(e).into_response())?;

        if !is_admin {
            return Err(Redirect::to(paths::ACCESS_DENIED).into_response());
        }
        Ok(Self(user))
    }
}
