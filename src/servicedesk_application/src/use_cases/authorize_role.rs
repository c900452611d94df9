use servicedesk_core::{Role, UserId, UserStore, UserStoreError};

use crate::error::AccountError;

/// Whether the signed-in user holds a role.
pub struct AuthorizeRoleUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> AuthorizeRoleUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "AuthorizeRoleUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: &UserId, role: Role) -> Result<bool, AccountError> {
        match self.user_store.get_user(user_id).await {
            Ok(user) => Ok(user.has_role(role)),
            Err(UserStoreError::UserNotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
