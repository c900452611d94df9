//! Framework-agnostic request handlers.
//!
//! Routes extract and deserialize the request, call one of these with the
//! shared [`AppState`](crate::state::AppState) and a response builder, and map
//! a [`HandlerError`] to their own error response.

pub mod admin;
pub mod confirm_email;
pub mod error;
pub mod installments;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod update_password;
mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{UserSummary, handle_access_denied, handle_list_users, handle_manage};
pub use confirm_email::{ConfirmEmailQuery, handle_confirm_email};
pub use error::HandlerError;
pub use installments::{InstallmentsRequest, handle_installments};
pub use login::{LoginRequest, handle_login};
pub use logout::handle_logout;
pub use profile::{
    ProfileResponse, UpdateProfileRequest, handle_get_profile, handle_resend_confirmation,
    handle_update_profile,
};
pub use register::{RegisterRequest, handle_register};
pub use reset_password::{
    ConfirmResetQuery, ConfirmResetRequest, ResetPasswordRequest, handle_confirm_reset_form,
    handle_confirm_reset_password, handle_reset_password,
};
pub use update_password::{UpdatePasswordRequest, handle_update_password};
