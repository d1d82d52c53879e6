//! Session cookie formatting and parsing.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Builds the `Set-Cookie` value that hands `token` to the client.
///
/// Tokens are URL-safe base64, so the value never needs quoting.
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> Option<HeaderValue> {
    let mut value = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_seconds}"
    );
    if secure {
        value.push_str("; Secure");
    }

    HeaderValue::from_str(&value).ok()
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub fn expired_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("session_id=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("session_id=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
    }
}

/// Extracts the session token from the request's `Cookie` headers.
///
/// Returns `None` when the cookie is absent or empty.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
