//! Account registration, login and logout.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{NewAccount, NewSession, normalize_username};
use crate::domain::repositories::{AccountRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::db_error::USERNAME_CONSTRAINT;
use crate::utils::password::PasswordHasher;
use crate::utils::session_token::{hash_session_token, new_session_token};

/// Minimum display name length, in characters.
pub const MIN_NAME_LENGTH: usize = 3;
/// Minimum username length, in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Default session lifetime. Sessions are never extended on activity.
pub const DEFAULT_SESSION_TTL: Duration = Duration::days(7);

/// A freshly minted session handed back to the caller.
///
/// `token` is the only copy of the raw bearer token; the store keeps its digest.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Service owning the account lifecycle and session minting.
///
/// Passwords are hashed with Argon2id on the blocking thread pool so request
/// workers are not stalled by the key derivation.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: PasswordHasher,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            sessions,
            hasher,
            clock,
            session_ttl,
        }
    }

    /// Registers an account and opens its first session.
    ///
    /// The username is lower-cased before the uniqueness check and insert.
    /// Account and session are written in one transaction by the repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a field map if any length check fails.
    /// Returns [`AppError::Conflict`] if the username is taken in any letter case.
    /// Returns [`AppError::Entropy`] if no salt or token can be drawn.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn register(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, AppError> {
        validate_registration(name, username, password)?;

        let username = normalize_username(username);
        let password_hash = self.hash_password(password).await?;

        let token = new_session_token()?;
        let expires_at = self.session_expiry()?;

        let account = self
            .accounts
            .create_with_session(
                NewAccount {
                    name: name.to_string(),
                    username,
                    password_hash,
                },
                NewSession {
                    token_hash: hash_session_token(&token),
                    expires_at,
                },
            )
            .await
            .map_err(|e| match e {
                AppError::Conflict { ref details, .. }
                    if details["constraint"] == USERNAME_CONSTRAINT =>
                {
                    AppError::conflict("Username already exists", json!({ "field": "username" }))
                }
                AppError::Conflict { .. } => {
                    warn!(error = %e, "Session digest collided during registration");
                    AppError::internal("Session could not be stored", json!({}))
                }
                other => other,
            })?;

        info!(user_id = account.id, "Account registered");

        Ok(IssuedSession {
            token,
            user_id: account.id,
            expires_at,
        })
    }

    /// Verifies credentials and opens a new session.
    ///
    /// Earlier sessions of the account stay valid. An unknown username and a
    /// wrong password produce the same error and cost one key derivation each.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on unknown username or wrong password.
    /// Returns [`AppError::Internal`] if the stored hash record is unreadable.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, AppError> {
        let username = normalize_username(username);

        let Some(account) = self.accounts.find_by_username(&username).await? else {
            let hasher = self.hasher;
            let password = password.to_owned();
            run_blocking(move || hasher.equalize_timing(&password)).await?;
            return Err(invalid_credentials());
        };

        let hasher = self.hasher;
        let candidate = password.to_owned();
        let record = account.password_hash.clone();
        let matches = run_blocking(move || hasher.verify(&candidate, &record)).await??;

        if !matches {
            info!(user_id = account.id, "Login rejected");
            return Err(invalid_credentials());
        }

        if self.hasher.needs_rehash(&account.password_hash) {
            self.rehash(account.id, password).await;
        }

        let session = self.open_session(account.id).await?;
        info!(user_id = account.id, "Login succeeded");

        Ok(session)
    }

    /// Deletes the session identified by `token`.
    ///
    /// Expired rows are deleted like live ones. Logging out twice is an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no session row matches the token.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let deleted = self.sessions.delete(&hash_session_token(token)).await?;

        if !deleted {
            return Err(AppError::unauthorized(
                "Authentication required",
                json!({ "reason": "Session not found" }),
            ));
        }

        info!("Session closed");
        Ok(())
    }

    /// Verifies the credential store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store does not answer.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.accounts.check_connection().await
    }

    /// Lifetime given to new sessions.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    async fn open_session(&self, user_id: i64) -> Result<IssuedSession, AppError> {
        let token = new_session_token()?;
        let expires_at = self.session_expiry()?;

        self.sessions
            .create(
                user_id,
                NewSession {
                    token_hash: hash_session_token(&token),
                    expires_at,
                },
            )
            .await?;

        Ok(IssuedSession {
            token,
            user_id,
            expires_at,
        })
    }

    fn session_expiry(&self) -> Result<DateTime<Utc>, AppError> {
        self.clock
            .now()
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| {
                tracing::error!("Session lifetime overflows the calendar");
                AppError::internal("Session expiry out of range", json!({}))
            })
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        Ok(run_blocking(move || hasher.hash(&password)).await??)
    }

    /// Upgrades a record produced under older parameters. Failures are logged only.
    async fn rehash(&self, user_id: i64, password: &str) {
        let result = async {
            let record = self.hash_password(password).await?;
            self.accounts.update_password_hash(user_id, &record).await
        }
        .await;

        match result {
            Ok(()) => info!(user_id, "Password hash upgraded"),
            Err(e) => warn!(user_id, error = %e, "Password hash upgrade failed"),
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password", json!({}))
}

/// Checks registration fields against the length policy.
///
/// All failing fields are reported at once.
fn validate_registration(name: &str, username: &str, password: &str) -> Result<(), AppError> {
    let mut fields = BTreeMap::new();

    if name.chars().count() < MIN_NAME_LENGTH {
        fields.insert(
            "name".to_string(),
            format!("must be at least {MIN_NAME_LENGTH} characters"),
        );
    }

    if username.chars().count() < MIN_USERNAME_LENGTH {
        fields.insert(
            "username".to_string(),
            format!("must be at least {MIN_USERNAME_LENGTH} characters"),
        );
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        fields.insert(
            "password".to_string(),
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::invalid_fields(fields))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "Blocking task failed");
        AppError::internal("Background task failed", json!({}))
    })
}
