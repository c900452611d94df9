pub mod account_service;
pub mod helpers;
pub mod tracing;

pub use account_service::{AccountService, BootstrapError};
pub use helpers::{configure_postgresql, redis_connection};
