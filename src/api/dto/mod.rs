//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input bounds.

pub mod auth;
pub mod health;
pub mod shorten;
