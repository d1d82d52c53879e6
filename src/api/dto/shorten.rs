//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// Absolute-URL checks happen in [`crate::application::services::LinkService`];
/// only the size bound is enforced here.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = 2048, message = "must be at most 2048 characters"))]
    pub url: String,

    /// Optional expiry. The link stops resolving at this instant.
    pub expires: Option<DateTime<Utc>>,
}

/// Created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Public short URL.
    pub url: String,
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}
