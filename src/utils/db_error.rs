//! Classification helpers for PostgreSQL errors.

/// Unique index guarding case-insensitive usernames.
pub const USERNAME_CONSTRAINT: &str = "users_username_lower_key";

/// Returns true if the error is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
