//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Accounts and transactional registration
//! - [`SessionRepository`] - Session storage and expiry-aware lookup
//! - [`LinkRepository`] - Short link storage and resolution
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod account_repository;
pub mod link_repository;
pub mod session_repository;

pub use account_repository::AccountRepository;
pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
