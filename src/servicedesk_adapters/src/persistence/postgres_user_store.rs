use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use servicedesk_core::{
    Email, LockoutPolicy, Password, Role, User, UserId, UserStore, UserStoreError, Username,
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::password_hashing::{compute_password_hash, verify_password_hash};

const USERNAME_CONSTRAINT: &str = "users_normalized_username_key";
const EMAIL_CONSTRAINT: &str = "users_normalized_email_key";

// Serializes registrations so the initial role sees a stable account count.
const REGISTRATION_LOCK: i64 = 0x5345_5256_4445_534b;

const SELECT_USERS: &str = r#"
    SELECT u.id, u.username, u.email, u.name, u.surname, u.email_confirmed,
           u.access_failed_count, u.lockout_end, u.lockout_enabled,
           COALESCE(
               array_agg(ur.role_name) FILTER (WHERE ur.role_name IS NOT NULL),
               '{}'
           ) AS roles
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    name: String,
    surname: String,
    email_confirmed: bool,
    access_failed_count: i32,
    lockout_end: Option<DateTime<Utc>>,
    lockout_enabled: bool,
    roles: Vec<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid = |e: &dyn std::fmt::Display| UserStoreError::UnexpectedError(e.to_string());
        let username = Username::parse(&row.username).map_err(|e| invalid(&e))?;
        let email = Email::try_from(Secret::new(row.email)).map_err(|e| invalid(&e))?;
        let roles = row
            .roles
            .iter()
            .map(|name| name.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(&e))?;
        let access_failed_count =
            u32::try_from(row.access_failed_count).map_err(|e| invalid(&e))?;

        Ok(User::new(
            UserId::from(row.id),
            username,
            email,
            row.name,
            row.surname,
        )
        .with_email_confirmed(row.email_confirmed)
        .with_roles(roles)
        .with_lockout(row.lockout_enabled, access_failed_count, row.lockout_end))
    }
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.constraint() {
            Some(USERNAME_CONSTRAINT) => return UserStoreError::DuplicateUsername,
            Some(EMAIL_CONSTRAINT) => return UserStoreError::DuplicateEmail,
            _ => {}
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<User>, UserStoreError> {
        let query = format!("{SELECT_USERS} WHERE {condition} = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;
        row.map(User::try_from).transpose()
    }
}

async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    password_hash: &Secret<String>,
) -> Result<(), UserStoreError> {
    sqlx::query(
        r#"
            INSERT INTO users (
                id, username, normalized_username, email, normalized_email,
                name, surname, email_confirmed, password_hash,
                access_failed_count, lockout_end, lockout_enabled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(user.id().as_uuid())
    .bind(user.username().as_str())
    .bind(user.username().normalized())
    .bind(user.email().as_ref().expose_secret())
    .bind(user.email().normalized())
    .bind(user.name())
    .bind(user.surname())
    .bind(user.email_confirmed())
    .bind(password_hash.expose_secret())
    .bind(user.access_failed_count() as i32)
    .bind(user.lockout_end())
    .bind(user.lockout_enabled())
    .execute(&mut **tx)
    .await
    .map_err(map_write_error)?;
    Ok(())
}

async fn replace_roles(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
) -> Result<(), UserStoreError> {
    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user.id().as_uuid())
        .execute(&mut **tx)
        .await
        .map_err(unexpected)?;

    let roles: Vec<&str> = user.roles().iter().map(Role::as_str).collect();
    sqlx::query(
        "INSERT INTO user_roles (user_id, role_name) SELECT $1, unnest($2::text[])",
    )
    .bind(user.id().as_uuid())
    .bind(roles)
    .execute(&mut **tx)
    .await
    .map_err(unexpected)?;
    Ok(())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        insert_user(&mut tx, &user, &password_hash).await?;
        replace_roles(&mut tx, &user).await?;
        tx.commit().await.map_err(unexpected)
    }

    /// Counts, inserts and grants the role in one transaction, holding an
    /// advisory lock so two first registrations cannot both become `Admin`.
    #[tracing::instrument(name = "Registering user in PostgreSQL", skip_all)]
    async fn add_user_with_initial_role(
        &self,
        mut user: User,
        password: Password,
    ) -> Result<Role, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(REGISTRATION_LOCK)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(unexpected)?;

        let role = Role::initial(existing as u64);
        user.add_role(role);
        insert_user(&mut tx, &user, &password_hash).await?;
        replace_roles(&mut tx, &user).await?;
        tx.commit().await.map_err(unexpected)?;
        Ok(role)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let query = format!("{SELECT_USERS} WHERE u.id = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        User::try_from(row)
    }

    #[tracing::instrument(name = "Finding user by username", skip_all)]
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError> {
        self.fetch_one_where("u.normalized_username", &username.normalized())
            .await
    }

    #[tracing::instrument(name = "Finding user by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        self.fetch_one_where("u.normalized_email", &email.normalized())
            .await
    }

    async fn count_users(&self) -> Result<u64, UserStoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(count as u64)
    }

    #[tracing::instrument(name = "Listing users", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let query = format!("{SELECT_USERS} GROUP BY u.id ORDER BY u.normalized_username");
        sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Writes the user row and its role rows in one transaction. The failed
    /// sign-in columns are left to the dedicated statements below.
    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = $2, normalized_email = $3, name = $4, surname = $5,
                    email_confirmed = $6, lockout_enabled = $7
                WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.email().normalized())
        .bind(user.name())
        .bind(user.surname())
        .bind(user.email_confirmed())
        .bind(user.lockout_enabled())
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        replace_roles(&mut tx, user).await?;
        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn check_password(
        &self,
        id: &UserId,
        candidate: &Secret<String>,
    ) -> Result<bool, UserStoreError> {
        let password_hash =
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?
                .ok_or(UserStoreError::UserNotFound)?;

        verify_password_hash(Secret::from(password_hash), candidate.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash.expose_secret())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    /// One conditional UPDATE, so the row lock orders racing failures.
    #[tracing::instrument(name = "Recording failed sign-in", skip_all)]
    async fn record_failed_access(
        &self,
        id: &UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let max_failed_attempts = i32::try_from(policy.max_failed_attempts).unwrap_or(i32::MAX);
        let lockout_end = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            r#"
                UPDATE users
                SET access_failed_count = CASE
                        WHEN access_failed_count + 1 >= $2 THEN 0
                        ELSE access_failed_count + 1
                    END,
                    lockout_end = CASE
                        WHEN access_failed_count + 1 >= $2 THEN $3
                        ELSE lockout_end
                    END
                WHERE id = $1
                  AND lockout_enabled
                  AND (lockout_end IS NULL OR lockout_end <= $4)
                RETURNING lockout_end
            "#,
        )
        .bind(id.as_uuid())
        .bind(max_failed_attempts)
        .bind(now + policy.window)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        if let Some(lockout_end) = lockout_end {
            return Ok(lockout_end.is_some_and(|end| end > now));
        }

        // Nothing counted: lockout disabled, already locked or no such user.
        let state = sqlx::query_as::<_, (bool, Option<DateTime<Utc>>)>(
            "SELECT lockout_enabled, lockout_end FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        let (enabled, lockout_end) = state.ok_or(UserStoreError::UserNotFound)?;
        Ok(enabled && lockout_end.is_some_and(|end| end > now))
    }

    #[tracing::instrument(name = "Resetting failed sign-ins", skip_all)]
    async fn reset_access_failed(&self, id: &UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            "UPDATE users SET access_failed_count = 0, lockout_end = NULL WHERE id = $1",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}
