//! In-memory port implementations shared by the use case tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use servicedesk_core::{
    BannedTokenStore, BannedTokenStoreError, Clock, Email, EmailMessage, EmailSender,
    EmailSenderError, GatewayError, InstallmentInfoRequest, InstallmentInfoResponse,
    LinkGenerator, LockoutPolicy, Password, PaymentGateway, Role, RoleStore, RoleStoreError, TokenProvider,
    TokenProviderError, TokenPurpose, User, UserId, UserStore, UserStoreError, Username,
};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<Vec<(User, String)>>>,
    pub fail_updates: Arc<std::sync::atomic::AtomicBool>,
}

impl MockUserStore {
    pub async fn insert(&self, user: User, password: &str) {
        self.users.write().await.push((user, password.to_string()));
    }

    pub async fn user(&self, id: &UserId) -> User {
        self.users
            .read()
            .await
            .iter()
            .find(|(u, _)| u.id() == id)
            .map(|(u, _)| u.clone())
            .expect("user exists")
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|(u, _)| u.username().normalized() == user.username().normalized())
        {
            return Err(UserStoreError::DuplicateUsername);
        }
        if users.iter().any(|(u, _)| u.email() == user.email()) {
            return Err(UserStoreError::DuplicateEmail);
        }
        users.push((user, password.as_ref().expose_secret().clone()));
        Ok(())
    }

    async fn add_user_with_initial_role(
        &self,
        user: User,
        password: Password,
    ) -> Result<Role, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|(u, _)| u.username().normalized() == user.username().normalized())
        {
            return Err(UserStoreError::DuplicateUsername);
        }
        if users.iter().any(|(u, _)| u.email() == user.email()) {
            return Err(UserStoreError::DuplicateEmail);
        }
        let role = Role::initial(users.len() as u64);
        // Hold the lock across a yield so racing registrations queue up.
        tokio::task::yield_now().await;
        let mut user = user;
        user.add_role(role);
        users.push((user, password.as_ref().expose_secret().clone()));
        Ok(role)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .iter()
            .find(|(u, _)| u.id() == id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|(u, _)| u.username().normalized() == username.normalized())
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|(u, _)| u.email() == email)
            .map(|(u, _)| u.clone()))
    }

    async fn count_users(&self) -> Result<u64, UserStoreError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.users.read().await.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        if self.fail_updates.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(UserStoreError::UnexpectedError("update failed".to_string()));
        }
        let mut users = self.users.write().await;
        let entry = users
            .iter_mut()
            .find(|(u, _)| u.id() == user.id())
            .ok_or(UserStoreError::UserNotFound)?;
        entry.0 = user.clone().with_lockout(
            user.lockout_enabled(),
            entry.0.access_failed_count(),
            entry.0.lockout_end(),
        );
        Ok(())
    }

    async fn check_password(
        &self,
        id: &UserId,
        candidate: &Secret<String>,
    ) -> Result<bool, UserStoreError> {
        let matches = {
            let users = self.users.read().await;
            let (_, password) = users
                .iter()
                .find(|(u, _)| u.id() == id)
                .ok_or(UserStoreError::UserNotFound)?;
            password == candidate.expose_secret()
        };
        // Real stores hash off the async thread; let other sign-ins run meanwhile.
        tokio::task::yield_now().await;
        Ok(matches)
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users
            .iter_mut()
            .find(|(u, _)| u.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        entry.1 = new_password.as_ref().expose_secret().clone();
        Ok(())
    }

    async fn record_failed_access(
        &self,
        id: &UserId,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users
            .iter_mut()
            .find(|(u, _)| u.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(entry.0.record_failed_access(policy, now))
    }

    async fn reset_access_failed(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let entry = users
            .iter_mut()
            .find(|(u, _)| u.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        entry.0.reset_access_failed();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockRoleStore {
    pub roles: Arc<RwLock<HashSet<Role>>>,
    pub created: Arc<RwLock<Vec<Role>>>,
}

#[async_trait]
impl RoleStore for MockRoleStore {
    async fn role_exists(&self, role: Role) -> Result<bool, RoleStoreError> {
        Ok(self.roles.read().await.contains(&role))
    }

    async fn create_role(&self, role: Role) -> Result<(), RoleStoreError> {
        self.roles.write().await.insert(role);
        self.created.write().await.push(role);
        Ok(())
    }
}

/// Issues sequential tokens and consumes them on successful validation.
#[derive(Clone, Default)]
pub struct MockTokenProvider {
    tokens: Arc<RwLock<HashMap<(UserId, TokenPurpose), String>>>,
    counter: Arc<std::sync::atomic::AtomicU64>,
}

impl MockTokenProvider {
    pub async fn current(&self, user_id: &UserId, purpose: TokenPurpose) -> Option<String> {
        self.tokens.read().await.get(&(*user_id, purpose)).cloned()
    }
}

#[async_trait]
impl TokenProvider for MockTokenProvider {
    async fn generate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
    ) -> Result<String, TokenProviderError> {
        let n = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let token = format!("token-{n}");
        self.tokens
            .write()
            .await
            .insert((*user_id, purpose), token.clone());
        Ok(token)
    }

    async fn validate_token(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
        token: &str,
    ) -> Result<bool, TokenProviderError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get(&(*user_id, purpose)) {
            Some(stored) if stored == token => {
                tokens.remove(&(*user_id, purpose));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockEmailSender {
    pub sent: Arc<RwLock<Vec<EmailMessage>>>,
    pub fail: bool,
}

impl MockEmailSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSenderError> {
        if self.fail {
            return Err(EmailSenderError::DeliveryFailed("smtp down".to_string()));
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

pub struct MockLinkGenerator;

impl LinkGenerator for MockLinkGenerator {
    fn callback_link(&self, purpose: TokenPurpose, user_id: &UserId, code: &str) -> String {
        let path = match purpose {
            TokenPurpose::EmailConfirmation => "/account/confirm-email",
            TokenPurpose::PasswordReset => "/account/confirm-reset-password",
        };
        format!("https://servicedesk.test{path}?userId={user_id}&code={code}")
    }
}

/// Extracts the `code` query value from the link inside a sent message.
pub fn code_from_message(message: &EmailMessage) -> String {
    let start = message.body().find("code=").expect("link has a code") + "code=".len();
    let rest = &message.body()[start..];
    let end = rest.find('\'').expect("link is quoted");
    rest[..end].to_string()
}

#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Utc::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

#[derive(Clone, Default)]
pub struct MockBannedTokenStore {
    pub tokens: Arc<RwLock<HashSet<String>>>,
    pub revoked_before: Arc<RwLock<HashMap<UserId, DateTime<Utc>>>>,
}

#[async_trait]
impl BannedTokenStore for MockBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        self.tokens.write().await.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        Ok(self.tokens.read().await.contains(token))
    }

    async fn revoke_sessions_before(
        &self,
        user_id: &UserId,
        before: DateTime<Utc>,
    ) -> Result<(), BannedTokenStoreError> {
        self.revoked_before.write().await.insert(*user_id, before);
        Ok(())
    }

    async fn sessions_revoked_before(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, BannedTokenStoreError> {
        Ok(self.revoked_before.read().await.get(user_id).copied())
    }
}

/// Answers every lookup with a canned response built from the request.
pub struct MockPaymentGateway<F>
where
    F: Fn(&InstallmentInfoRequest) -> Result<InstallmentInfoResponse, GatewayError> + Send + Sync,
{
    respond: F,
    pub requests: Mutex<Vec<InstallmentInfoRequest>>,
}

impl<F> MockPaymentGateway<F>
where
    F: Fn(&InstallmentInfoRequest) -> Result<InstallmentInfoResponse, GatewayError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<F> PaymentGateway for MockPaymentGateway<F>
where
    F: Fn(&InstallmentInfoRequest) -> Result<InstallmentInfoResponse, GatewayError> + Send + Sync,
{
    async fn retrieve_installment_info(
        &self,
        request: &InstallmentInfoRequest,
    ) -> Result<InstallmentInfoResponse, GatewayError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        (self.respond)(request)
    }
}

pub fn user(username: &str, email: &str) -> User {
    User::new(
        UserId::new(),
        Username::parse(username).unwrap(),
        Email::try_from(email).unwrap(),
        "Test".to_string(),
        "User".to_string(),
    )
}

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::new(value.to_string())).unwrap()
}
