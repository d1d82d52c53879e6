//! Repository trait for account storage.

use crate::domain::entities::{Account, NewAccount, NewSession};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for accounts (the `users` table).
///
/// Usernames passed in are already normalized; implementations must still
/// enforce case-insensitive uniqueness at the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates an account and its first session atomically.
    ///
    /// Runs in a single transaction: check the username is free, insert the
    /// account, insert the session owned by the new account id, commit. Any
    /// failure (or dropping the future) rolls the whole registration back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken, including when a
    /// concurrent registration commits first.
    /// Returns [`AppError::Persistence`] on database errors.
    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> Result<Account, AppError>;

    /// Finds an account by normalized username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Replaces an account's password hash record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has the given id.
    /// Returns [`AppError::Persistence`] on database errors.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Lists all accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on database errors.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the round-trip fails.
    async fn check_connection(&self) -> Result<(), AppError>;
}
