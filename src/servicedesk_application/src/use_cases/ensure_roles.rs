use servicedesk_core::{Role, RoleStore};

use crate::error::AccountError;

/// Creates every role the workflow assigns. Safe to run on every startup.
pub struct EnsureRolesUseCase<'a, R>
where
    R: RoleStore + ?Sized,
{
    role_store: &'a R,
}

impl<'a, R> EnsureRolesUseCase<'a, R>
where
    R: RoleStore + ?Sized,
{
    pub fn new(role_store: &'a R) -> Self {
        Self { role_store }
    }

    /// Returns the roles that had to be created.
    #[tracing::instrument(name = "EnsureRolesUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<Role>, AccountError> {
        let mut created = Vec::new();
        for role in Role::ALL {
            if !self.role_store.role_exists(role).await? {
                self.role_store.create_role(role).await?;
                tracing::info!(role = %role, "Created missing role");
                created.push(role);
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRoleStore;

    #[tokio::test]
    async fn test_creates_missing_roles_once() {
        let role_store = MockRoleStore::default();
        role_store.roles.write().await.insert(Role::Admin);

        let use_case = EnsureRolesUseCase::new(&role_store);
        let created = use_case.execute().await.unwrap();
        assert_eq!(created, vec![Role::User, Role::Passive]);

        let created = use_case.execute().await.unwrap();
        assert!(created.is_empty());
        assert_eq!(role_store.created.read().await.len(), 2);
    }
}
