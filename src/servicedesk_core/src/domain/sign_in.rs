use chrono::Duration;
use serde::Deserialize;

use crate::domain::user_id::UserId;

/// Outcome of a password sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInResult {
    Succeeded(UserId),
    Failed,
    LockedOut,
}

impl SignInResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, SignInResult::Succeeded(_))
    }
}

/// Failed-attempt lockout parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LockoutPolicy {
    #[serde(rename = "window_in_seconds", deserialize_with = "deserialize_seconds")]
    pub window: Duration,
    pub max_failed_attempts: u32,
    /// Whether freshly registered accounts start with lockout enabled.
    pub allowed_for_new_users: bool,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            window: Duration::minutes(5),
            max_failed_attempts: 3,
            allowed_for_new_users: false,
        }
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let seconds = i64::deserialize(deserializer)?;
    Duration::try_seconds(seconds)
        .ok_or_else(|| serde::de::Error::custom("lockout window out of range"))
}
