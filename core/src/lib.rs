//! # DevPath Core
//!
//! Core business logic and domain layer for the DevPath auth services.
//! This crate contains the domain entities, the token issuer and session
//! service, the repository and registry ports with in-memory mocks, and
//! the error taxonomy shared by every other layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
