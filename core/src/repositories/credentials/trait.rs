//! Credential store trait, the boundary to the external identity system.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserIdentity;
use crate::errors::DomainError;

/// Port to the system that owns users and passwords.
///
/// This subsystem never sees password hashes; it only asks the store to
/// authenticate and to resolve identities during refresh rotation.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Authenticate an email/password pair.
    ///
    /// # Returns
    /// * `Ok(UserIdentity)` - Credentials valid, email confirmed
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError::EmailNotConfirmed)` - Valid credentials, unconfirmed account
    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, DomainError>;

    /// Resolve an identity by user ID, used when rotating a refresh token.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError>;
}
