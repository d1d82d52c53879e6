//! Utility functions shared by services, handlers and repositories.
//!
//! - [`code_generator`] - Short code generation
//! - [`session_token`] - Session token minting and digesting
//! - [`password`] - Argon2id hash records
//! - [`cookie`] - Session cookie formatting and parsing
//! - [`deadline`] - Time limits on service calls
//! - [`db_error`] - PostgreSQL error classification

pub mod code_generator;
pub mod cookie;
pub mod db_error;
pub mod deadline;
pub mod password;
pub mod session_token;
