//! Per-request session check for protected routes.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};

use crate::domain::clock::Clock;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use crate::utils::session_token::hash_session_token;

/// Resolves a presented session token to the owning account id.
///
/// Fails closed: a missing row, an expired row and a store failure all deny
/// the request. Missing and expired are indistinguishable to the caller.
pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionAuthenticator {
    pub fn new(sessions: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { sessions, clock }
    }

    /// Returns the account id behind `token` if its session is still valid.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty, unknown or expired.
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        if token.is_empty() {
            return Err(unauthorized());
        }

        let now = self.clock.now();

        let session = self
            .sessions
            .find_active(&hash_session_token(token), now)
            .await
            .map_err(|e| {
                error!(error = %e, "Session lookup failed");
                AppError::internal("Session check failed", json!({}))
            })?;

        match session {
            Some(session) if session.is_active_at(now) => Ok(session.user_id),
            _ => {
                debug!("Session rejected");
                Err(unauthorized())
            }
        }
    }
}

fn unauthorized() -> AppError {
    AppError::unauthorized("Authentication required", json!({}))
}
