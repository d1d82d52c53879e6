//! Application layer services implementing business logic.
//!
//! Services consume repository traits through `Arc<dyn …>` handles injected at
//! construction and expose the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and logout
//! - [`services::session_authenticator::SessionAuthenticator`] - Session check for protected routes
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
