use servicedesk_core::{User, UserStore};

use crate::error::AccountError;

/// Lists every account for the admin area.
pub struct ListUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> ListUsersUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.user_store.list_users().await?)
    }
}
