//! DTOs for account endpoints.
//!
//! Fields default to empty so that a missing field reaches the length policy
//! in [`crate::application::services::AuthService`] and is reported per field.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/auth/register`.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "must be between 1 and 128 characters"))]
    pub password: String,
}

/// Response for register, login and logout.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Response for `GET /api/auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: i64,
}
