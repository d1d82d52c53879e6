//! Homepage handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use crate::state::AppState;
use crate::utils::cookie::read_session_cookie;
use crate::utils::deadline::with_deadline;

/// Template for the homepage.
///
/// Renders `templates/index.html`: the shorten form for a live session,
/// login and registration forms otherwise.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub authenticated: bool,
}

/// Renders the homepage.
///
/// # Endpoint
///
/// `GET /`
///
/// Any failure to check the session renders the logged-out page.
pub async fn home_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let authenticated = match read_session_cookie(&headers) {
        Some(token) => with_deadline(
            state.settings.link_timeout,
            "authenticate",
            state.authenticator.authenticate(&token),
        )
        .await
        .is_ok(),
        None => false,
    };

    HomeTemplate { authenticated }
}
