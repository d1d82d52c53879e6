//! Session entity.

use chrono::{DateTime, Utc};

/// A server-side session row.
///
/// `token_hash` is the SHA-256 digest of the bearer token handed to the client.
#[derive(Debug, Clone)]
pub struct Session {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session authenticates only while `now < expires_at`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Input data for creating a session; the owner is supplied separately.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
