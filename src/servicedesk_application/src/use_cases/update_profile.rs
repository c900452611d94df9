use servicedesk_core::{
    Email, EmailSender, LinkGenerator, Role, TokenProvider, TokenPurpose, UserId, UserStore,
};

use crate::{error::AccountError, notifications::send_token_link, use_cases::get_profile::Profile};

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub surname: String,
    pub email: Email,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfileOutcome {
    pub profile: Profile,
    pub email_changed: bool,
}

/// Update profile use case.
///
/// Name, email and role changes are written with a single store update. A new
/// address demotes the account to `Passive` and is mailed a confirmation link
/// once that update has succeeded.
pub struct UpdateProfileUseCase<'a, U, T, L, E>
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
}

impl<'a, U, T, L, E> UpdateProfileUseCase<'a, U, T, L, E>
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
    ) -> Self {
        Self {
            user_store,
            token_provider,
            link_generator,
            email_sender,
        }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UpdateProfileOutcome, AccountError> {
        let mut user = self.user_store.get_user(user_id).await?;
        user.set_display_name(update.name, update.surname);

        let email_changed = user.email() != &update.email;
        if email_changed {
            if let Some(owner) = self.user_store.find_by_email(&update.email).await? {
                if owner.id() != user_id {
                    return Err(AccountError::DuplicateEmail);
                }
            }
            user.remove_role(Role::User);
            user.add_role(Role::Passive);
            user.change_email(update.email);
        }

        self.user_store.update_user(&user).await?;

        if email_changed {
            tracing::info!(user_id = %user_id, "Email changed, confirmation required");
            send_token_link(
                self.token_provider,
                self.link_generator,
                self.email_sender,
                &user,
                TokenPurpose::EmailConfirmation,
            )
            .await?;
        }

        Ok(UpdateProfileOutcome {
            profile: Profile::from(&user),
            email_changed,
        })
    }
}
