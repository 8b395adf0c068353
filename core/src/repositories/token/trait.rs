//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository contract for refresh token rows.
///
/// Tokens are stored hashed and are never physically deleted on revocation;
/// `conditional_revoke` is the single correctness-critical mutation and must
/// be atomic in every implementation.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh token row.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved row
    /// * `Err(DomainError)` - Save failed (duplicate digest, store down)
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token row by the digest of its secret.
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically flip `is_revoked` from false to true on the row with the
    /// given digest.
    ///
    /// This is the single-use gate for rotation: of any number of concurrent
    /// callers presenting the same secret, exactly one may observe `Ok(true)`.
    ///
    /// # Returns
    /// * `Ok(true)` - This caller won the transition
    /// * `Ok(false)` - Row missing or already revoked
    async fn conditional_revoke(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every live refresh token of a user in one batch.
    ///
    /// Must not leave a partial-revocation window; a single conditional
    /// UPDATE, not a row-by-row loop.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows transitioned
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete rows whose `expires_at` has passed.
    ///
    /// Expired rows are logically dead either way; this only reclaims space
    /// and should run from a periodic job.
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
