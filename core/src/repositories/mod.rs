//! Ports consumed by the token issuer and session service.
//!
//! Each port ships with an in-memory mock used across the workspace's
//! tests; the infra crate provides the production implementations.

pub mod credentials;
pub mod registry;
pub mod token;

pub use credentials::{CredentialStore, MockCredentialStore};
pub use registry::{MockRevocationRegistry, RevocationRegistry};
pub use token::{MockTokenRepository, TokenRepository};
