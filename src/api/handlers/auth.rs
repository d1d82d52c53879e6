//! Handlers for account endpoints.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use crate::api::middleware::session_auth::CurrentUser;
use crate::application::services::IssuedSession;
use crate::error::AppError;
use crate::state::{AppState, HttpSettings};
use crate::utils::cookie::{expired_session_cookie, read_session_cookie, session_cookie};
use crate::utils::deadline::with_deadline;

/// Creates an account and logs it in.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "username": "alice", "password": "longenough1" }
/// ```
///
/// # Response
///
/// `201 Created` with a `Set-Cookie: session_id=...` header.
///
/// # Errors
///
/// - `400` if any field fails the length policy (all failing fields reported)
/// - `409` if the username is taken in any letter case
/// - `504` if registration does not finish within the auth deadline
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = with_deadline(
        state.settings.auth_timeout,
        "register",
        state
            .auth_service
            .register(&payload.name, &payload.username, &payload.password),
    )
    .await?;

    let cookie = issue_cookie(&session, &state.settings)?;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Registered successfully",
            user_id: Some(session.user_id),
        }),
    ))
}

/// Verifies credentials and opens a new session.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// - `401` on unknown username or wrong password (same body for both)
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = with_deadline(
        state.settings.auth_timeout,
        "login",
        state.auth_service.login(&payload.username, &payload.password),
    )
    .await?;

    let cookie = issue_cookie(&session, &state.settings)?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Logged in successfully",
            user_id: Some(session.user_id),
        }),
    ))
}

/// Deletes the caller's session and clears the cookie.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// # Errors
///
/// - `401` if no session cookie is sent, or the session no longer exists
///   (including a second logout)
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = read_session_cookie(&headers).ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "Session cookie is missing" }),
        )
    })?;

    with_deadline(
        state.settings.auth_timeout,
        "logout",
        state.auth_service.logout(&token),
    )
    .await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, expired_session_cookie(state.settings.cookie_secure))],
        Json(AuthResponse {
            message: "Logged out successfully",
            user_id: None,
        }),
    ))
}

/// Returns the account id behind the session cookie.
///
/// # Endpoint
///
/// `GET /api/auth/me`
pub async fn me_handler(Extension(CurrentUser(user_id)): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse { user_id })
}

fn issue_cookie(session: &IssuedSession, settings: &HttpSettings) -> Result<HeaderValue, AppError> {
    session_cookie(
        &session.token,
        settings.session_ttl.num_seconds(),
        settings.cookie_secure,
    )
    .ok_or_else(|| AppError::internal("Session cookie could not be encoded", json!({})))
}
