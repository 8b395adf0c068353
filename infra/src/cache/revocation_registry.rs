//! Redis implementation of the revocation registry port.

use async_trait::async_trait;

use dp_core::errors::DomainError;
use dp_core::repositories::RevocationRegistry;

use super::redis_client::RedisClient;

/// Revocation registry backed by Redis.
///
/// Keys carry their own TTL, so revocation entries disappear exactly when
/// the tokens they blacklist would have expired anyway. Nothing here
/// deletes keys explicitly.
#[derive(Clone)]
pub struct RedisRevocationRegistry {
    client: RedisClient,
}

impl RedisRevocationRegistry {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RevocationRegistry for RedisRevocationRegistry {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| DomainError::registry(e.to_string()))
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.client
            .exists(key)
            .await
            .map_err(|e| DomainError::registry(e.to_string()))
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DomainError> {
        let pattern = format!("{}*", prefix);

        let keys = self
            .client
            .scan_keys(&pattern)
            .await
            .map_err(|e| DomainError::registry(e.to_string()))?;

        let values = self
            .client
            .get_many(&keys)
            .await
            .map_err(|e| DomainError::registry(e.to_string()))?;

        // A key can expire between SCAN and MGET; drop those pairs.
        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect())
    }
}
