//! # Infrastructure Layer
//!
//! Concrete adapters behind the `dp_core` ports:
//!
//! - **Database**: MySQL implementations using SQLx (refresh token store,
//!   credential store)
//! - **Cache**: Redis client and the revocation registry built on it

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and the revocation registry
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
