//! Configuration module organized by concern
//!
//! - `auth` - JWT signing and token lifetime configuration
//! - `cache` - Redis connection configuration for the revocation registry
//! - `database` - MySQL connection and pool configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod server;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
