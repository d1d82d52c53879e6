//! PostgreSQL implementation of account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, NewSession};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::db_error::USERNAME_CONSTRAINT;

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Account::new(r.id, r.name, r.username, r.password, r.created_at)
    }
}

/// PostgreSQL repository for the `users` table.
///
/// Case-insensitive uniqueness is enforced by the `users_username_lower_key`
/// index on `lower(username)`.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> Result<Account, AppError> {
        // Dropping `tx` without commit rolls back.
        let mut tx = self.pool.begin().await?;

        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE lower(username) = lower($1))",
        )
        .bind(&account.username)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
            return Err(AppError::conflict(
                "Username already exists",
                json!({ "constraint": USERNAME_CONSTRAINT }),
            ));
        }

        // A concurrent registration that passed the check above loses here on
        // the unique index and surfaces as Conflict.
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (name, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, username, password, created_at
            "#,
        )
        .bind(&account.name)
        .bind(&account.username)
        .bind(&account.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO sessions (session_id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&session.token_hash)
            .bind(row.id)
            .bind(session.expires_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, name, username, password, created_at
            FROM users
            WHERE lower(username) = lower($1)
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Account::from))
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Account not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, username, password, created_at FROM users ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
