use serde::{Deserialize, Serialize};
use secrecy::ExposeSecret;
use servicedesk_application::{
    GetProfileUseCase, Profile, ProfileUpdate, ResendConfirmationUseCase, UpdateProfileUseCase,
};
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers, UserId};

use crate::{
    handlers::{HandlerError, validation::FieldErrors},
    state::AppState,
};

const PROFILE_UPDATED: &str = "Profile updated.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub email_confirmed: bool,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            user_name: profile.username.to_string(),
            email: profile.email.as_ref().expose_secret().clone(),
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            email_confirmed: profile.email_confirmed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
}

pub async fn handle_get_profile<B>(
    state: &AppState,
    user_id: &UserId,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let profile = GetProfileUseCase::new(&*state.user_store)
        .execute(user_id)
        .await?;
    Ok(builder.ok_json(serde_json::json!(ProfileResponse::from(&profile))))
}

pub async fn handle_update_profile<B>(
    state: &AppState,
    user_id: &UserId,
    request: UpdateProfileRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let mut errors = FieldErrors::default();
    let name = errors.required("name", &request.name);
    let surname = errors.required("surname", &request.surname);
    let email = errors.email("email", &request.email);
    errors.into_result()?;
    let (Some(name), Some(surname), Some(email)) = (name, surname, email) else {
        return Err(HandlerError::BadRequest);
    };

    let use_case = UpdateProfileUseCase::new(
        &*state.user_store,
        &*state.token_provider,
        &*state.link_generator,
        &*state.email_sender,
    );
    let outcome = use_case
        .execute(
            user_id,
            ProfileUpdate {
                name,
                surname,
                email,
            },
        )
        .await?;

    Ok(builder.ok_json(serde_json::json!({
        "profile": ProfileResponse::from(&outcome.profile),
        "emailChanged": outcome.email_changed,
        "message": PROFILE_UPDATED,
    })))
}

pub async fn handle_resend_confirmation<B>(
    state: &AppState,
    user_id: &UserId,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let use_case = ResendConfirmationUseCase::new(
        &*state.user_store,
        &*state.token_provider,
        &*state.link_generator,
        &*state.email_sender,
    );
    let outcome = use_case.execute(user_id).await?;
    Ok(builder.ok_json(serde_json::json!({ "message": outcome.status_message() })))
}
