//! HTTP middleware for request processing.
//!
//! Provides session authentication and request tracing.

pub mod session_auth;
pub mod tracing;
