use std::collections::HashSet;
use std::sync::Arc;

use servicedesk_core::{Role, RoleStore, RoleStoreError};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapRoleStore {
    roles: Arc<RwLock<HashSet<Role>>>,
}

impl HashMapRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RoleStore for HashMapRoleStore {
    async fn role_exists(&self, role: Role) -> Result<bool, RoleStoreError> {
        Ok(self.roles.read().await.contains(&role))
    }

    async fn create_role(&self, role: Role) -> Result<(), RoleStoreError> {
        self.roles.write().await.insert(role);
        Ok(())
    }
}
