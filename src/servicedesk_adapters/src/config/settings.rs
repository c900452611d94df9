use std::path::PathBuf;

use secrecy::Secret;
use serde::Deserialize;
use servicedesk_core::{LockoutPolicy, PasswordPolicy};

use crate::config::constants::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub identity: IdentitySettings,
    pub email_client: EmailClientSettings,
    pub payment: PaymentSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    /// Absolute origin used for links in emails, e.g. `https://desk.example.com`.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub jwt_secret: Secret<String>,
    pub expiry_in_seconds: i64,
    #[serde(default = "default_true")]
    pub sliding: bool,
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    #[serde(default)]
    pub password: PasswordPolicy,
    #[serde(default)]
    pub lockout: LockoutPolicy,
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_in_seconds: i64,
}

fn default_token_lifetime() -> i64 {
    24 * 60 * 60
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            password: PasswordPolicy::default(),
            lockout: LockoutPolicy::default(),
            token_lifetime_in_seconds: default_token_lifetime(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub timeout_in_millis: u64,
}

fn default_locale() -> String {
    "tr".to_string()
}

impl PaymentSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_in_millis)
    }
}

/// Origins allowed to make credentialed cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &http::HeaderValue) -> bool {
        origin
            .to_str()
            .is_ok_and(|origin| self.0.iter().any(|allowed| allowed == origin))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AppSettings {
    /// Layers `base.json`, the optional `{APP_ENVIRONMENT}.json` and `APP__*`
    /// environment variables, in that order of precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(env::APP_CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));
        let environment =
            std::env::var(env::APP_ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_string());

        Self::load_from(config_dir, &environment)
    }

    pub fn load_from(
        config_dir: impl Into<PathBuf>,
        environment: &str,
    ) -> Result<Self, config::ConfigError> {
        let config_dir = config_dir.into();
        config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.json")))
            .add_source(
                config::File::from(config_dir.join(format!("{environment}.json"))).required(false),
            )
            .add_source(
                config::Environment::with_prefix(env::ENV_VAR_PREFIX)
                    .prefix_separator(env::ENV_VAR_SEPARATOR)
                    .separator(env::ENV_VAR_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
