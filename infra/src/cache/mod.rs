//! Redis-backed caching infrastructure.
//!
//! `RedisClient` owns the connection and retry policy; the revocation
//! registry is a thin port adapter on top of it.

pub mod redis_client;
pub mod revocation_registry;

pub use redis_client::RedisClient;
pub use revocation_registry::RedisRevocationRegistry;
