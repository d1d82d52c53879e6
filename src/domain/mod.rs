//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable time source
//!
//! The domain layer has no dependencies on infrastructure or presentation.
//! Repository traits are implemented in `crate::infrastructure::persistence`
//! and consumed by `crate::application::services`.

pub mod clock;
pub mod entities;
pub mod repositories;
