use servicedesk_core::{
    Email, EmailSender, LinkGenerator, LockoutPolicy, Password, Role, TokenProvider,
    TokenPurpose, User, UserId, UserStore, Username,
};

use crate::{error::AccountError, notifications::send_token_link};

/// Registration input, validated before it reaches the use case.
#[derive(Debug)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub name: String,
    pub surname: String,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    pub user_id: UserId,
    pub role: Role,
}

/// Register use case - creates the account, assigns its first role and
/// sends the confirmation email.
pub struct RegisterUseCase<'a, U, T, L, E>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
    L: LinkGenerator + ?Sized,
    E: EmailSender + ?Sized,
{
    user_store: &'a U,
    token_provider: &'a T,
    link_generator: &'a L,
    email_sender: &'a E,
    lockout: &'a LockoutPolicy,
}

impl<'a, U, T, L, E> RegisterUseCase<'a, U, T, L, E>
where
    U: UserStore + ?Sized,
    T: TokenProvider + ?Sized,
    L: LinkGenerator + ?Sized,
    E: EmailSender + ?Sized,
{
    pub fn new(
        user_store: &'a U,
        token_provider: &'a T,
        link_generator: &'a L,
        email_sender: &'a E,
        lockout: &'a LockoutPolicy,
    ) -> Self {
        Self {
            user_store,
            token_provider,
            link_generator,
            email_sender,
            lockout,
        }
    }

    /// The first account ever registered becomes `Admin`; every later one
    /// starts as `Passive` until its email is confirmed. The account and its
    /// role are stored together.
    #[tracing::instrument(
        name = "RegisterUseCase::execute",
        skip(self, registration),
        fields(username = %registration.username)
    )]
    pub async fn execute(&self, registration: Registration) -> Result<RegisterOutcome, AccountError> {
        let Registration {
            username,
            email,
            name,
            surname,
            password,
        } = registration;

        if self.user_store.find_by_username(&username).await?.is_some() {
            return Err(AccountError::DuplicateUsername);
        }
        if self.user_store.find_by_email(&email).await?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let user = User::new(UserId::new(), username, email, name, surname).with_lockout(
            self.lockout.allowed_for_new_users,
            0,
            None,
        );
        let user_id = *user.id();
        let role = self
            .user_store
            .add_user_with_initial_role(user.clone(), password)
            .await
            .map_err(|e| match AccountError::from(e) {
                dup @ (AccountError::DuplicateUsername | AccountError::DuplicateEmail) => dup,
                other => {
                    tracing::error!(error = %other, "Failed to create user");
                    AccountError::UnknownPersistenceError(other.to_string())
                }
            })?;
        tracing::info!(user_id = %user_id, role = %role, "User registered");

        send_token_link(
            self.token_provider,
            self.link_generator,
            self.email_sender,
            &user,
            TokenPurpose::EmailConfirmation,
        )
        .await?;

        Ok(RegisterOutcome { user_id, role })
    }
}
