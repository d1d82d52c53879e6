//! API route configuration.

use crate::api::handlers::{
    login_handler, logout_handler, me_handler, register_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a session.
///
/// Logout reads the cookie itself so an expired session can still be closed.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account and log in
/// - `POST /auth/login`    - Open a new session
/// - `POST /auth/logout`   - Close the current session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
}

/// Routes requiring a live session, guarded by
/// [`crate::api::middleware::session_auth`].
///
/// # Endpoints
///
/// - `GET  /auth/me` - Account id behind the session
/// - `POST /url`     - Create a short link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/url", post(shorten_handler))
}
