use secrecy::ExposeSecret;
use serde::Serialize;
use servicedesk_application::ListUsersUseCase;
use servicedesk_core::{AuthResponseBuilder, AuthResponseHelpers, User};

use crate::{handlers::HandlerError, state::AppState};

const ACCESS_DENIED: &str = "You do not have permission to access this resource.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub user_name: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub roles: Vec<String>,
    pub email_confirmed: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().to_string(),
            user_name: user.username().to_string(),
            email: user.email().as_ref().expose_secret().clone(),
            name: user.name().to_owned(),
            surname: user.surname().to_owned(),
            roles: user.roles().iter().map(|r| r.as_str().to_owned()).collect(),
            email_confirmed: user.email_confirmed(),
        }
    }
}

pub fn handle_access_denied<B: AuthResponseBuilder>(builder: B) -> B::Response {
    builder.forbidden(ACCESS_DENIED)
}

/// Landing data for the admin area.
pub async fn handle_manage<B>(state: &AppState, builder: B) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let users = ListUsersUseCase::new(&*state.user_store).execute().await?;
    let unconfirmed = users.iter().filter(|u| !u.email_confirmed()).count();
    Ok(builder.ok_json(serde_json::json!({
        "userCount": users.len(),
        "unconfirmedCount": unconfirmed,
    })))
}

pub async fn handle_list_users<B>(state: &AppState, builder: B) -> Result<B::Response, HandlerError>
where
    B: AuthResponseBuilder,
{
    let users = ListUsersUseCase::new(&*state.user_store).execute().await?;
    let users: Vec<UserSummary> = users.iter().map(UserSummary::from).collect();
    Ok(builder.ok_json(serde_json::json!(users)))
}
