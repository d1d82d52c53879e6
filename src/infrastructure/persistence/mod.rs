//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits over a shared
//! `PgPool`, using SQLx parameterized queries.
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Accounts and transactional registration
//! - [`PgSessionRepository`] - Session storage keyed by token digest
//! - [`PgLinkRepository`] - Short link storage and resolution

pub mod pg_account_repository;
pub mod pg_link_repository;
pub mod pg_session_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_session_repository::PgSessionRepository;
