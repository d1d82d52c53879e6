//! Handler for link shortening endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::session_auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Creates a short link owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.org", "expires": "2030-01-01T00:00:00Z" }
/// ```
///
/// `expires` is optional.
///
/// # Response
///
/// ```json
/// { "url": "https://sho.rt/aB3dE9z", "code": "aB3dE9z" }
/// ```
///
/// # Errors
///
/// - `400` if the URL is not absolute with a host, or the expiry is not in the future
/// - `401` without a live session
/// - `500` if no unique code could be allocated
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let created = with_deadline(
        state.settings.link_timeout,
        "create_short_link",
        state
            .link_service
            .create_short_link(&payload.url, Some(user_id), payload.expires),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            url: created.short_url,
            code: created.code,
            expires: created.expires_at,
        }),
    ))
}
