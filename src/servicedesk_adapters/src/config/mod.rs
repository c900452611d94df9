pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, ApplicationSettings, EmailClientSettings, IdentitySettings,
    PaymentSettings, PostgresSettings, RedisSettings, SessionSettings,
};
