use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{
    email::Email, role::Role, sign_in::LockoutPolicy, user_id::UserId, username::Username,
};

/// An account record. Credential material is owned by the user store and is
/// never part of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    name: String,
    surname: String,
    email_confirmed: bool,
    roles: BTreeSet<Role>,
    access_failed_count: u32,
    lockout_end: Option<DateTime<Utc>>,
    lockout_enabled: bool,
}

impl User {
    pub fn new(id: UserId, username: Username, email: Email, name: String, surname: String) -> Self {
        Self {
            id,
            username,
            email,
            name,
            surname,
            email_confirmed: false,
            roles: BTreeSet::new(),
            access_failed_count: 0,
            lockout_end: None,
            lockout_enabled: false,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn with_email_confirmed(mut self, email_confirmed: bool) -> Self {
        self.email_confirmed = email_confirmed;
        self
    }

    pub fn with_lockout(
        mut self,
        lockout_enabled: bool,
        access_failed_count: u32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Self {
        self.lockout_enabled = lockout_enabled;
        self.access_failed_count = access_failed_count;
        self.lockout_end = lockout_end;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn email_confirmed(&self) -> bool {
        self.email_confirmed
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn access_failed_count(&self) -> u32 {
        self.access_failed_count
    }

    pub fn lockout_end(&self) -> Option<DateTime<Utc>> {
        self.lockout_end
    }

    pub fn lockout_enabled(&self) -> bool {
        self.lockout_enabled
    }

    pub fn set_display_name(&mut self, name: String, surname: String) {
        self.name = name;
        self.surname = surname;
    }

    /// Replaces the email address. The new address starts unconfirmed.
    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.email_confirmed = false;
    }

    pub fn add_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    pub fn remove_role(&mut self, role: Role) -> bool {
        self.roles.remove(&role)
    }

    /// Swaps `from` for `to` when the user holds `from`. Returns whether anything changed.
    pub fn transition_role(&mut self, from: Role, to: Role) -> bool {
        if self.roles.remove(&from) {
            self.roles.insert(to);
            true
        } else {
            false
        }
    }

    /// Marks the address verified. Once confirmed an account is no longer new,
    /// so lockout starts applying to it.
    pub fn confirm_email(&mut self) {
        self.email_confirmed = true;
        self.lockout_enabled = true;
    }

    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_enabled && self.lockout_end.is_some_and(|end| end > now)
    }

    /// Counts a failed sign-in. Returns `true` when the account is locked
    /// after this failure. A locked account is not counted again.
    pub fn record_failed_access(&mut self, policy: &LockoutPolicy, now: DateTime<Utc>) -> bool {
        if !self.lockout_enabled {
            return false;
        }
        if self.is_locked_out(now) {
            return true;
        }
        self.access_failed_count = self.access_failed_count.saturating_add(1);
        if self.access_failed_count >= policy.max_failed_attempts {
            self.lockout_end = Some(now + policy.window);
            self.access_failed_count = 0;
            return true;
        }
        false
    }

    pub fn reset_access_failed(&mut self) {
        self.access_failed_count = 0;
        self.lockout_end = None;
    }
}
