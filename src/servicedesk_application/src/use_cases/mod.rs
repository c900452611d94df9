pub mod authorize_role;
pub mod change_password;
pub mod check_installments;
pub mod confirm_email;
pub mod ensure_roles;
pub mod get_profile;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod resend_confirmation;
pub mod update_profile;
