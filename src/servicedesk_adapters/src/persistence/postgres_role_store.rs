use servicedesk_core::{Role, RoleStore, RoleStoreError};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RoleStore for PostgresRoleStore {
    #[tracing::instrument(name = "Checking role in PostgreSQL", skip(self))]
    async fn role_exists(&self, role: Role) -> Result<bool, RoleStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM roles WHERE name = $1)")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RoleStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Creating role in PostgreSQL", skip(self))]
    async fn create_role(&self, role: Role) -> Result<(), RoleStoreError> {
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RoleStoreError::UnexpectedError(e.to_string()))?;
        Ok(())
    }
}
