//! Core domain entities.
//!
//! Entities are plain data structures. Each has a separate `New*` struct for
//! creation, carrying only the fields the caller supplies.
//!
//! - [`Account`] - A registered user with a password hash record
//! - [`Session`] - A server-side login session
//! - [`Link`] - A short code mapped to a long URL

pub mod account;
pub mod link;
pub mod session;

pub use account::{Account, NewAccount, normalize_username};
pub use link::{Link, NewLink};
pub use session::{NewSession, Session};
