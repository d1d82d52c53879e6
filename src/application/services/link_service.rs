//! Short link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::clock::Clock;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed};

/// Number of fresh codes tried before giving up on a colliding insert.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Result of a successful shorten request.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub code: String,
    /// Public base URL joined with the code.
    pub short_url: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service for creating and resolving short links.
///
/// Long URLs are stored exactly as submitted; resolution returns the same
/// string byte for byte.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// A trailing `/` on `base_url` is dropped.
    pub fn new(links: Arc<dyn LinkRepository>, clock: Arc<dyn Clock>, base_url: &str) -> Self {
        Self {
            links,
            clock,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link owned by `user_id`.
    ///
    /// # Code allocation
    ///
    /// A random code is inserted without a prior existence check. When the
    /// primary key rejects it, a new code is drawn, up to
    /// [`MAX_CODE_ATTEMPTS`] inserts in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not absolute with a host,
    /// or if `expires_at` is not in the future.
    /// Returns [`AppError::Persistence`] if no unique code could be allocated or
    /// on database errors.
    pub async fn create_short_link(
        &self,
        long_url: &str,
        user_id: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CreatedLink, AppError> {
        validate_long_url(long_url)?;

        if let Some(expiry) = expires_at
            && expiry <= self.clock.now()
        {
            return Err(AppError::bad_request(
                "Expiry must be in the future",
                json!({ "field": "expires" }),
            ));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(),
                long_url: long_url.to_string(),
                user_id,
                expires_at,
            };

            match self.links.create(new_link).await {
                Ok(link) => {
                    info!(code = %link.code, user_id = ?link.user_id, "Short link created");
                    return Ok(self.created(link));
                }
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "Short code allocation exhausted");
        Err(AppError::persistence(
            "Could not allocate a unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a code to its stored long URL.
    ///
    /// Links past their expiry resolve like unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn resolve_short_link(&self, code: &str) -> Result<String, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        if !is_well_formed(code) {
            return Err(not_found());
        }

        let link = self
            .links
            .find_active_by_code(code, self.clock.now())
            .await?
            .ok_or_else(not_found)?;

        Ok(link.long_url)
    }

    /// Public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn created(&self, link: Link) -> CreatedLink {
        CreatedLink {
            short_url: self.short_url(&link.code),
            code: link.code,
            long_url: link.long_url,
            expires_at: link.expires_at,
        }
    }
}

/// Accepts absolute URLs with a non-empty scheme and host.
///
/// Input the parser would silently rewrite by trimming (surrounding whitespace,
/// control characters) is rejected so the stored value is what was submitted.
fn validate_long_url(raw: &str) -> Result<(), AppError> {
    let invalid = |reason: &str| {
        AppError::bad_request("Invalid URL", json!({ "field": "url", "reason": reason }))
    };

    if raw.is_empty() {
        return Err(invalid("empty"));
    }

    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("contains whitespace or control characters"));
    }

    let parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

    if parsed.scheme().is_empty() || parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing scheme or host"));
    }

    Ok(())
}
