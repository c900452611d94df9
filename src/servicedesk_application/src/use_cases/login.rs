use secrecy::Secret;
use servicedesk_core::{Clock, LockoutPolicy, SignInResult, UserStore, Username};

use crate::error::AccountError;

/// Login use case - password sign-in with failed-attempt lockout.
pub struct LoginUseCase<'a, U, C>
where
    U: UserStore + ?Sized,
    C: Clock + ?Sized,
{
    user_store: &'a U,
    clock: &'a C,
    lockout: &'a LockoutPolicy,
}

impl<'a, U, C> LoginUseCase<'a, U, C>
where
    U: UserStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(user_store: &'a U, clock: &'a C, lockout: &'a LockoutPolicy) -> Self {
        Self {
            user_store,
            clock,
            lockout,
        }
    }

    /// Locked accounts are rejected without checking the password. Failed
    /// attempts are counted by the store against the stored row, so racing
    /// sign-ins cannot lose an increment.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: &str,
        password: &Secret<String>,
    ) -> Result<SignInResult, AccountError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(SignInResult::Failed);
        };
        let Some(user) = self.user_store.find_by_username(&username).await? else {
            return Ok(SignInResult::Failed);
        };

        let now = self.clock.now();
        if user.is_locked_out(now) {
            tracing::warn!(user_id = %user.id(), "Sign-in attempt on locked account");
            return Ok(SignInResult::LockedOut);
        }

        if self.user_store.check_password(user.id(), password).await? {
            if user.access_failed_count() > 0 || user.lockout_end().is_some() {
                self.user_store.reset_access_failed(user.id()).await?;
            }
            return Ok(SignInResult::Succeeded(*user.id()));
        }

        if !user.lockout_enabled() {
            return Ok(SignInResult::Failed);
        }
        let locked = self
            .user_store
            .record_failed_access(user.id(), self.lockout, now)
            .await?;
        if locked {
            tracing::warn!(user_id = %user.id(), "Account locked out");
            Ok(SignInResult::LockedOut)
        } else {
            Ok(SignInResult::Failed)
        }
    }
}
