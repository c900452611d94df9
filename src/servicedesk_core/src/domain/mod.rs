pub mod email;
pub mod email_message;
pub mod installment;
pub mod password;
pub mod role;
pub mod sign_in;
pub mod token;
pub mod user;
pub mod user_id;
pub mod username;
