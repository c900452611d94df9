pub mod error;
pub mod notifications;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::{AccountError, FieldError};
pub use use_cases::{
    authorize_role::AuthorizeRoleUseCase,
    change_password::ChangePasswordUseCase,
    check_installments::{CheckInstallmentsError, CheckInstallmentsUseCase},
    confirm_email::{ConfirmEmailOutcome, ConfirmEmailUseCase},
    ensure_roles::EnsureRolesUseCase,
    get_profile::{GetProfileUseCase, Profile},
    list_users::ListUsersUseCase,
    login::LoginUseCase,
    logout::LogoutUseCase,
    register::{RegisterOutcome, RegisterUseCase, Registration},
    request_password_reset::{PasswordResetRequestOutcome, RequestPasswordResetUseCase},
    reset_password::{RESET_PASSWORD_SUCCESS, ResetPasswordUseCase},
    resend_confirmation::{ResendConfirmationOutcome, ResendConfirmationUseCase},
    update_profile::{ProfileUpdate, UpdateProfileOutcome, UpdateProfileUseCase},
};
