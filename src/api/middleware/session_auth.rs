//! Session cookie authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookie::read_session_cookie;
use crate::utils::deadline::with_deadline;

/// Account id of the authenticated caller.
///
/// Inserted into request extensions by [`layer`]; handlers behind it read it
/// with `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

/// Requires a live session for the wrapped routes.
///
/// # Cookie Format
///
/// ```text
/// Cookie: session_id=<token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the cookie is missing, unknown or expired.
/// Missing and expired are reported identically.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = read_session_cookie(req.headers()).ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "Session cookie is missing" }),
        )
    })?;

    let user_id = with_deadline(
        st.settings.link_timeout,
        "authenticate",
        st.authenticator.authenticate(&token),
    )
    .await?;

    req.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(req).await)
}
