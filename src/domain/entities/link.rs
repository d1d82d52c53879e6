//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL.
///
/// Links are never updated. `user_id` is `None` for links whose owner was
/// deleted or that were created without an account.
#[derive(Debug, Clone)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub user_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        long_url: String,
        user_id: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            long_url,
            user_id,
            expires_at,
            created_at,
        }
    }

    /// Returns true if the link has passed its expiry time at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub user_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}
