use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use servicedesk_core::{
    Email, LockoutPolicy, Password, Role, User, UserId, UserStore, UserStoreError, Username,
};
use tokio::sync::RwLock;

use super::password_hashing::{compute_password_hash, verify_password_hash};

struct StoredUser {
    user: User,
    password_hash: Secret<String>,
}

/// In-memory user store for tests and local runs. Credentials are hashed
/// exactly as in the Postgres store.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflicts(users: &HashMap<UserId, StoredUser>, user: &User) -> Option<UserStoreError> {
    let username = user.username().normalized();
    users
        .values()
        .filter(|stored| stored.user.id() != user.id())
        .find_map(|stored| {
            if stored.user.username().normalized() == username {
                Some(UserStoreError::DuplicateUsername)
            } else if stored.user.email() == user.email() {
                Some(UserStoreError::DuplicateEmail)
            } else {
                None
            }
        })
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if let Some(conflict) = conflicts(&users, &user) {
            return Err(conflict);
        }
        users.insert(
            *user.id(),
            StoredUser {
                user,
                password_hash,
            },
        );
        Ok(())
    }

    async fn add_user_with_initial_role(
        &self,
        mut user: User,
        password: Password,
    ) -> Result<Role, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if let Some(conflict) = conflicts(&users, &user) {
            return Err(conflict);
        }
        let role = Role::initial(users.len() as u64);
        user.add_role(role);
        users.insert(
            *user.id(),
            StoredUser {
                user,
                password_hash,
            },
        );
        Ok(role)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError> {
        let normalized = username.normalized();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| stored.user.username().normalized() == normalized)
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| stored.user.email() == email)
            .map(|stored| stored.user.clone()))
    }

    async fn count_users(&self) -> Result<u64, UserStoreError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut listed: Vec<User> = users.values().map(|stored| stored.user.clone()).collect();
        listed.sort_by_key(|user| user.username().normalized());
        Ok(listed)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(conflict) = conflicts(&users, user) {
            return Err(conflict);
        }
        let stored = users.get_mut(user.id()).ok_or(UserStoreError::UserNotFound)?;
        stored.user = user.clone().with_lockout(
            user.lockout_enabled(),
            stored.user.access_failed_count(),
            stored.user.lockout_end(),
        );
        Ok(())
    }

    async fn check_password(
        &self,
        id: &UserId,
        candidate: &Secret<String>,
    ) -> Result<bool, UserStoreError> {
        let password_hash = {
            let users = self.users.read().await;
            users
                .get(id)
                .map(|stored| stored.password_hash.clone())
                .ok_or(UserStoreError::UserNotFound)?
        };
        verify_password_hash(password_hash, candidate.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;
        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        stored.password_hash = password_hash;
        Ok(())
    }

    async fn record_failed_access(
        &self,
        id: &UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        Ok(stored.user.record_failed_access(policy, now))
    }

    async fn reset_access_failed(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.reset_access_failed();
        Ok(())
    }
}
