//! Argon2id password hashing.
//!
//! Hash records use the PHC string format, which carries everything needed to
//! re-derive the key:
//!
//! ```text
//! $argon2id$v=19$m=65536,t=2,p=1$<base64 salt>$<base64 key>
//! ```
//!
//! Verification reads the cost parameters, salt and key length from the record
//! itself, so raising [`HashParams::default`] later does not break older records.

use argon2::password_hash::{self, SaltString};
use argon2::{ARGON2ID_IDENT, Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version};
use argon2::PasswordHasher as _;

use crate::utils::session_token::EntropyError;

/// Argon2id cost parameters and output sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    /// Salt length in bytes.
    pub salt_length: usize,
    /// Derived key length in bytes.
    pub key_length: usize,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 2,
            parallelism: 1,
            salt_length: 16,
            key_length: 32,
        }
    }
}

/// Failure while producing a new hash record.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error("invalid hash parameters: {0}")]
    Params(String),

    #[error("key derivation failed: {0}")]
    Derive(String),
}

/// A stored hash record could not be interpreted.
///
/// Distinct from a wrong password, which is `Ok(false)` from [`PasswordHasher::verify`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed hash record: {0}")]
    Malformed(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported argon2 version: {0:?}")]
    UnsupportedVersion(Option<u32>),
}

/// Hashes and verifies passwords under a fixed Argon2id policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    params: HashParams,
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> HashParams {
        self.params
    }

    /// Hashes `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Entropy`] if no salt can be drawn, or
    /// [`HashError::Params`] if the configured parameters are out of range.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let mut salt = vec![0u8; self.params.salt_length];
        getrandom::fill(&mut salt).map_err(EntropyError::from)?;

        self.hash_with_salt(password, &salt)
    }

    /// Verifies `password` against a stored hash record.
    ///
    /// The derived keys are compared through `password_hash::Output`, whose
    /// equality is constant-time.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the record is malformed, is not Argon2id, or
    /// uses an Argon2 version other than 0x13.
    pub fn verify(&self, password: &str, record: &str) -> Result<bool, DecodeError> {
        let parsed = decode(record)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DecodeError::Malformed(e.to_string())),
        }
    }

    /// Runs one key derivation and discards the result.
    ///
    /// Login calls this when the username does not exist so that both failure
    /// paths cost the same.
    pub fn equalize_timing(&self, password: &str) {
        let salt = vec![0u8; self.params.salt_length];
        if let Err(e) = self.hash_with_salt(password, &salt) {
            tracing::debug!(error = %e, "Timing equalization hash failed");
        }
    }

    /// Returns true if `record` was produced under different parameters.
    ///
    /// Malformed records report `false`; they fail verification instead.
    pub fn needs_rehash(&self, record: &str) -> bool {
        let Ok(parsed) = decode(record) else {
            return false;
        };

        let expected_salt_chars = (self.params.salt_length * 4).div_ceil(3);

        parsed.params.get_decimal("m") != Some(self.params.memory_kib)
            || parsed.params.get_decimal("t") != Some(self.params.iterations)
            || parsed.params.get_decimal("p") != Some(self.params.parallelism)
            || parsed.hash.map(|h| h.len()) != Some(self.params.key_length)
            || parsed.salt.map(|s| s.as_str().len()) != Some(expected_salt_chars)
    }

    fn hash_with_salt(&self, password: &str, salt: &[u8]) -> Result<String, HashError> {
        let salt = SaltString::encode_b64(salt).map_err(|e| HashError::Params(e.to_string()))?;

        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            Some(self.params.key_length),
        )
        .map_err(|e| HashError::Params(e.to_string()))?;

        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Derive(e.to_string()))
    }
}

fn decode(record: &str) -> Result<PasswordHash<'_>, DecodeError> {
    let parsed = PasswordHash::new(record).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if parsed.algorithm != ARGON2ID_IDENT {
        return Err(DecodeError::UnsupportedAlgorithm(
            parsed.algorithm.to_string(),
        ));
    }

    if parsed.version != Some(u32::from(Version::V0x13)) {
        return Err(DecodeError::UnsupportedVersion(parsed.version));
    }

    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(DecodeError::Malformed(
            "missing salt or key".to_string(),
        ));
    }

    Ok(parsed)
}
