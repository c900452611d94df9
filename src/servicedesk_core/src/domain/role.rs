use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown role: {0}")]
pub struct RoleError(pub String);

/// The closed set of roles an account can hold.
///
/// `Passive` is held by accounts whose email address has not been verified,
/// `User` is the standard active role and `Admin` unlocks the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
    Passive,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Passive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Passive => "Passive",
        }
    }

    /// Role granted at registration: the first account becomes `Admin`,
    /// every later one starts `Passive` until its email is verified.
    pub fn initial(existing_accounts: u64) -> Role {
        if existing_accounts == 0 {
            Role::Admin
        } else {
            Role::Passive
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RoleError(s.to_owned()))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
