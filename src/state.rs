//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AuthService, LinkService, SessionAuthenticator};

/// Per-deployment HTTP settings read by handlers.
#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    /// Session lifetime, also used as the cookie `Max-Age`.
    pub session_ttl: chrono::Duration,
    pub cookie_secure: bool,
    /// Deadline for register, login and logout.
    pub auth_timeout: Duration,
    /// Deadline for session checks, link creation and resolution.
    pub link_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            session_ttl: chrono::Duration::days(7),
            cookie_secure: false,
            auth_timeout: Duration::from_secs(120),
            link_timeout: Duration::from_secs(5),
        }
    }
}

/// Services and settings shared by every request.
///
/// Cloning is cheap; services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub authenticator: Arc<SessionAuthenticator>,
    pub settings: HttpSettings,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        link_service: Arc<LinkService>,
        authenticator: Arc<SessionAuthenticator>,
        settings: HttpSettings,
    ) -> Self {
        Self {
            auth_service,
            link_service,
            authenticator,
            settings,
        }
    }
}
