//! In-memory revocation registry for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationRegistry;

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Mock registry honoring per-key TTLs.
///
/// Can be flipped into an unavailable state to exercise the gateway's
/// fail-closed policy.
#[derive(Clone, Default)]
pub struct MockRevocationRegistry {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    unavailable: Arc<RwLock<bool>>,
}

impl MockRevocationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the registry becoming unreachable
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Number of live entries
    pub async fn live_len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| e.is_live()).count()
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.unavailable.read().await {
            return Err(DomainError::registry("registry unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationRegistry for MockRevocationRegistry {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available().await?;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available().await?;

        let entries = self.entries.read().await;
        Ok(entries.get(key).map(|e| e.is_live()).unwrap_or(false))
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, DomainError> {
        self.check_available().await?;

        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && entry.is_live())
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect())
    }
}
