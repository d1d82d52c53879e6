//! Repository trait for server-side sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the `sessions` table.
///
/// All lookups take the SHA-256 digest of the token, never the raw token.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token digest already exists.
    /// Returns [`AppError::Persistence`] on database errors.
    async fn create(&self, user_id: i64, session: NewSession) -> Result<Session, AppError>;

    /// Finds a session that is still valid at `now`.
    ///
    /// The expiry filter is part of the query: a row with `expires_at <= now`
    /// is reported as `None` even though it still exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError>;

    /// Deletes a session by token digest, regardless of expiry.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Deletes every session that expired at or before `now`.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Deletes every session of one account.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError>;
}
