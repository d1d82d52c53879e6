//! Session token generation and hashing.
//!
//! Tokens are 32 bytes from the operating system CSPRNG, encoded as URL-safe
//! base64 without padding (43 characters). Only the SHA-256 digest of a token is
//! persisted, so a leaked `sessions` table cannot be replayed as cookies.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of random bytes behind each session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Failure to draw bytes from the operating system entropy source.
#[derive(Debug, thiserror::Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(#[from] getrandom::Error);

/// Generates a new opaque session token.
///
/// # Errors
///
/// Returns [`EntropyError`] if the operating system refuses to supply random bytes.
pub fn new_session_token() -> Result<String, EntropyError> {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];
    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Hashes a raw session token into the form stored in `sessions.session_id`.
///
/// Returns a 64-character lowercase hex SHA-256 digest.
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
