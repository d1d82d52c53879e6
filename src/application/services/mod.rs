//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod session_authenticator;

pub use auth_service::{AuthService, IssuedSession};
pub use link_service::{CreatedLink, LinkService};
pub use session_authenticator::SessionAuthenticator;
