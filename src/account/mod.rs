//! Account records and the persistence collaborator seam.

pub mod store;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    Guide,
    LeadGuide,
    Admin,
}

/// Identity record as held by the backing store.
///
/// Never serialized outward; responses use [`AccountApi`], which carries no
/// password hash and no reset fields.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub password_changed_at: DateTime<Utc>,
    pub password_reset_token_hash: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            password_changed_at: Utc::now(),
            password_reset_token_hash: None,
            password_reset_expires: None,
        }
    }

    /// True if the password was mutated after a token issued at
    /// `token_issued_at` (unix seconds). Such tokens are permanently invalid.
    pub fn changed_password_after(&self, token_issued_at: i64) -> bool {
        self.password_changed_at.timestamp() > token_issued_at
    }

    pub fn set_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.password_changed_at = Utc::now();
    }

    pub fn set_reset_token(&mut self, token_hash: String, window: TimeDelta) {
        self.password_reset_token_hash = Some(token_hash);
        self.password_reset_expires = Some(Utc::now() + window);
    }

    pub fn clear_reset_token(&mut self) {
        self.password_reset_token_hash = None;
        self.password_reset_expires = None;
    }

    pub fn reset_expired(&self) -> bool {
        match self.password_reset_expires {
            Some(expires) => expires <= Utc::now(),
            None => true,
        }
    }
}

/// Outward representation of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountApi {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountApi {
    fn from(value: &Account) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
            role: value.role,
        }
    }
}

impl From<Account> for AccountApi {
    fn from(value: Account) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
        }
    }
}

/// Canonical form used for lookups and uniqueness.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
