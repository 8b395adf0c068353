//! Shared configuration and common types for the DevPath auth services
//!
//! This crate provides the pieces used across all server modules:
//! - Configuration types (JWT, cache, database, server)
//! - Wire-level response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use types::response::ErrorResponse;
