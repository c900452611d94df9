//! Axum-specific routes.
//!
//! Each route extracts what it needs, calls the framework-agnostic handler
//! and converts failures into an [`ApiError`](crate::error::ApiError).

pub mod admin;
pub mod confirm_email;
pub mod installments;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod update_password;

pub use admin::{access_denied, manage, manage_users};
pub use confirm_email::confirm_email;
pub use installments::installments;
pub use login::login;
pub use logout::logout;
pub use profile::{profile, resend_confirmation, update_profile};
pub use register::register;
pub use reset_password::{confirm_reset_password, confirm_reset_password_form, reset_password};
pub use update_password::update_password;
