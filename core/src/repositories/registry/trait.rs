//! Revocation registry trait over the shared key/value store.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Fast key/value surface with per-key expiry, consulted on every gated
/// request.
///
/// Writes are individually atomic; concurrent writers are acceptable
/// because revocation is monotonic per key — a stale overwrite only affects
/// freshness, never safety. Entries are never deleted explicitly, they
/// expire on their own.
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Store a value under `key` for `ttl_seconds`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Whether a live (unexpired) entry exists for `key`.
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// All live entries whose key starts with `prefix`, as (key, value)
    /// pairs. Used by bulk revocation to enumerate a user's issued jtis.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DomainError>;
}
