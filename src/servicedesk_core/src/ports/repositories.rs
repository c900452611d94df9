use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email, password::Password, role::Role, sign_in::LockoutPolicy, user::User,
    user_id::UserId, username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Username is already taken")]
    DuplicateUsername,
    #[error("Email is already taken")]
    DuplicateEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateUsername, Self::DuplicateUsername)
                | (Self::DuplicateEmail, Self::DuplicateEmail)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Account persistence. Usernames and emails are unique case-insensitively.
///
/// `update_user` writes the whole record, roles included, as one unit: either
/// every change is stored or none is. It leaves the failed sign-in counter and
/// lockout end alone; those only move through `record_failed_access` and
/// `reset_access_failed`, which apply atomically against the stored row.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError>;
    /// Adds `user` together with `Role::initial` of the accounts already
    /// stored, counted in the same unit of work. Returns the granted role.
    async fn add_user_with_initial_role(
        &self,
        user: User,
        password: Password,
    ) -> Result<Role, UserStoreError>;
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn count_users(&self) -> Result<u64, UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
    async fn update_user(&self, user: &User) -> Result<(), UserStoreError>;
    async fn check_password(
        &self,
        id: &UserId,
        candidate: &Secret<String>,
    ) -> Result<bool, UserStoreError>;
    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    /// Applies `User::record_failed_access` to the stored account. Returns
    /// `true` when the account is locked afterwards.
    async fn record_failed_access(
        &self,
        id: &UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError>;
    async fn reset_access_failed(&self, id: &UserId) -> Result<(), UserStoreError>;
}

// RoleStore port trait and errors
#[derive(Debug, Error)]
pub enum RoleStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn role_exists(&self, role: Role) -> Result<bool, RoleStoreError>;
    async fn create_role(&self, role: Role) -> Result<(), RoleStoreError>;
}

// BannedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Revoked sessions: single tokens, and every session of a user issued
/// before a point in time.
#[async_trait]
pub trait BannedTokenStore: Send + Sync {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError>;
    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError>;
    async fn revoke_sessions_before(
        &self,
        user_id: &UserId,
        before: DateTime<Utc>,
    ) -> Result<(), BannedTokenStoreError>;
    async fn sessions_revoked_before(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, BannedTokenStoreError>;
}
