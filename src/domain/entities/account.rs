//! Account entity and username normalization.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `username` is always stored in normalized (lower-case) form and is unique
/// across the table. `password_hash` is a self-describing Argon2id record.
#[derive(Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance.
    pub fn new(
        id: i64,
        name: String,
        username: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            username,
            password_hash,
            created_at,
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input data for creating a new account.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Normalizes a username for storage and lookup.
///
/// Applied on every write and every read so `Alice` and `alice` are one account.
pub fn normalize_username(raw: &str) -> String {
    raw.to_lowercase()
}
