use servicedesk_core::{Email, User, UserId, UserStore, Username};

use crate::error::AccountError;

/// The editable part of an account, as shown on the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user_id: UserId,
    pub username: Username,
    pub email: Email,
    pub name: String,
    pub surname: String,
    pub email_confirmed: bool,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            user_id: *user.id(),
            username: user.username().clone(),
            email: user.email().clone(),
            name: user.name().to_string(),
            surname: user.surname().to_string(),
            email_confirmed: user.email_confirmed(),
        }
    }
}

pub struct GetProfileUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> GetProfileUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: &UserId) -> Result<Profile, AccountError> {
        let user = self.user_store.get_user(user_id).await?;
        Ok(Profile::from(&user))
    }
}
