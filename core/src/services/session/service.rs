//! Session service: issue, refresh, and revoke sessions.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{CredentialStore, RevocationRegistry, TokenRepository};
use crate::services::token::TokenService;

/// Façade composing the credential store with the token issuer
pub struct SessionService<C, R, G>
where
    C: CredentialStore,
    R: TokenRepository,
    G: RevocationRegistry,
{
    credentials: Arc<C>,
    token_service: Arc<TokenService<R, G>>,
}

impl<C, R, G> SessionService<C, R, G>
where
    C: CredentialStore,
    R: TokenRepository,
    G: RevocationRegistry,
{
    /// Create a new session service
    pub fn new(credentials: Arc<C>, token_service: Arc<TokenService<R, G>>) -> Self {
        Self {
            credentials,
            token_service,
        }
    }

    /// Authenticate an email/password pair and mint a fresh session.
    ///
    /// Credential failures pass through untouched; they are surfaced to the
    /// caller, never retried here.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let identity = self.credentials.check_credentials(email, password).await?;

        info!(user_id = %identity.id, "login succeeded");
        self.token_service.issue_tokens(&identity).await
    }

    /// Rotate a refresh token into a new pair.
    ///
    /// The presented secret is consumed (atomically, single-use) before
    /// anything is issued; only then is the identity resolved and a new
    /// pair minted for it.
    pub async fn refresh(&self, refresh_secret: &str) -> Result<TokenPair, DomainError> {
        let user_id = self.token_service.consume_refresh_token(refresh_secret).await?;

        let identity = self
            .credentials
            .find_by_id(user_id)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        debug!(user_id = %identity.id, "refresh token rotated");
        self.token_service.issue_tokens(&identity).await
    }

    /// Revoke every live credential of the user. Used by logout and by
    /// administrative revocation; idempotent.
    pub async fn revoke_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked = self.token_service.revoke_all(user_id).await?;

        info!(%user_id, revoked, "revoked all user sessions");
        Ok(revoked)
    }
}
