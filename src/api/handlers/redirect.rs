//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - `302 Found` with `Location` set to the stored long URL
/// - `404 Not Found` with `Location: /` for unknown or expired codes
///
/// # Errors
///
/// Store failures and deadline expiry are returned as JSON errors.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolved = with_deadline(
        state.settings.link_timeout,
        "resolve_short_link",
        state.link_service.resolve_short_link(&code),
    )
    .await;

    match resolved {
        Ok(long_url) => {
            let location = HeaderValue::from_str(&long_url).map_err(|_| {
                AppError::internal(
                    "Stored URL is not a valid header value",
                    serde_json::json!({ "code": code }),
                )
            })?;

            Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
        }
        Err(AppError::NotFound { .. }) => {
            debug!(code = %code, "Unknown short code");
            Ok((StatusCode::NOT_FOUND, [(LOCATION, HeaderValue::from_static("/"))]).into_response())
        }
        Err(e) => Err(e),
    }
}
