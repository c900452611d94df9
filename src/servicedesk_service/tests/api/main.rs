mod account;
mod admin;
mod helpers;
mod installments;
mod reset_password;
