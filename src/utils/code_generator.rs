//! Short code generation.
//!
//! Codes are [`CODE_LENGTH`] symbols drawn independently and uniformly from a
//! 62-character alphanumeric alphabet, giving 62^7 ≈ 3.5 × 10^12 possible codes.
//! Uniqueness is not checked here: the `urls` primary key rejects duplicates and
//! [`crate::application::services::LinkService`] retries with a fresh code.

use rand::Rng;

/// Number of symbols in a generated short code.
pub const CODE_LENGTH: usize = 7;

/// Symbols a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random short code.
///
/// Uses the thread-local generator from `rand`, which is a CSPRNG reseeded
/// from the operating system. `random_range` is unbiased, so every symbol is
/// equally likely at every position.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
///
/// Used to reject obviously foreign paths before touching the database.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
