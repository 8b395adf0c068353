//! Token service module
//!
//! This module owns the whole token lifecycle:
//! - Access token issuance and verification (HS256, fixed issuer/audience)
//! - Opaque refresh token generation, single-use rotation
//! - Bulk revocation and the revocation registry bookkeeping

mod config;
pub mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
