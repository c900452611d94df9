use secrecy::Secret;
use serde::Deserialize;
use servicedesk_application::{RegisterUseCase, Registration};
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers};

use crate::{
    config::paths,
    handlers::{HandlerError, validation::FieldErrors},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
}

/// Creates the account and redirects to the login page.
pub async fn handle_register<B>(
    state: &AppState,
    request: RegisterRequest,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let mut errors = FieldErrors::default();
    let username = errors.username("userName", &request.user_name);
    let email = errors.email("email", &request.email);
    let name = errors.required("name", &request.name);
    let surname = errors.required("surname", &request.surname);
    let password = errors.new_password(
        "password",
        "confirmPassword",
        request.password,
        &request.confirm_password,
        &state.identity.password,
    );
    errors.into_result()?;

    let (Some(username), Some(email), Some(name), Some(surname), Some(password)) =
        (username, email, name, surname, password)
    else {
        return Err(HandlerError::BadRequest);
    };

    let use_case = RegisterUseCase::new(
        &*state.user_store,
        &*state.token_provider,
        &*state.link_generator,
        &*state.email_sender,
        &state.identity.lockout,
    );
    use_case
        .execute(Registration {
            username,
            email,
            name,
            surname,
            password,
        })
        .await?;

    Ok(builder.see_other(paths::LOGIN, None))
}
