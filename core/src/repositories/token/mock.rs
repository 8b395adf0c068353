//! In-memory implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository backed by a map keyed on token digest.
///
/// The write lock makes `conditional_revoke` an atomic check-and-set, so
/// concurrency tests exercise the same single-use semantics the SQL
/// implementation provides.
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held, revoked or not
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the repository holds no rows
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::store("duplicate token digest"));
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn conditional_revoke(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if !token.is_revoked => {
                token.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        // Expired rows are already dead; skip them so the count matches
        // what the SQL implementation reports.
        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.is_revoked && !token.is_expired() {
                token.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, token| !token.is_expired());

        Ok(before - tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: Uuid, hash: &str) -> RefreshToken {
        RefreshToken::new(user_id, hash.to_string(), 604800)
    }

    #[tokio::test]
    async fn create_rejects_duplicate_digest() {
        let repo = MockTokenRepository::new();
        let user = Uuid::new_v4();

        repo.create(row(user, "digest")).await.unwrap();
        let result = repo.create(row(user, "digest")).await;

        assert!(matches!(result, Err(DomainError::Store { .. })));
    }

    #[tokio::test]
    async fn conditional_revoke_succeeds_once() {
        let repo = MockTokenRepository::new();
        repo.create(row(Uuid::new_v4(), "digest")).await.unwrap();

        assert!(repo.conditional_revoke("digest").await.unwrap());
        assert!(!repo.conditional_revoke("digest").await.unwrap());
        assert!(!repo.conditional_revoke("missing").await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_conditional_revoke_has_single_winner() {
        let repo = MockTokenRepository::new();
        repo.create(row(Uuid::new_v4(), "digest")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.conditional_revoke("digest").await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn revoke_all_for_user_is_idempotent() {
        let repo = MockTokenRepository::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        repo.create(row(user, "a")).await.unwrap();
        repo.create(row(user, "b")).await.unwrap();
        repo.create(row(other, "c")).await.unwrap();

        assert_eq!(repo.revoke_all_for_user(user).await.unwrap(), 2);
        assert_eq!(repo.revoke_all_for_user(user).await.unwrap(), 0);

        let untouched = repo.find_by_hash("c").await.unwrap().unwrap();
        assert!(!untouched.is_revoked);
    }

    #[tokio::test]
    async fn revoke_all_for_user_skips_expired_rows() {
        let repo = MockTokenRepository::new();
        let user = Uuid::new_v4();

        let mut stale = row(user, "stale");
        stale.expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        repo.create(stale).await.unwrap();
        repo.create(row(user, "live")).await.unwrap();

        assert_eq!(repo.revoke_all_for_user(user).await.unwrap(), 1);

        let skipped = repo.find_by_hash("stale").await.unwrap().unwrap();
        assert!(!skipped.is_revoked);
    }

    #[tokio::test]
    async fn delete_expired_removes_only_dead_rows() {
        let repo = MockTokenRepository::new();
        let user = Uuid::new_v4();

        let mut dead = row(user, "dead");
        dead.expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        repo.create(dead).await.unwrap();
        repo.create(row(user, "live")).await.unwrap();

        assert_eq!(repo.delete_expired().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_hash("live").await.unwrap().is_some());
    }
}
