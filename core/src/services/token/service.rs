//! Token issuer: mints signed access tokens and opaque refresh tokens,
//! rotates refresh tokens single-use, and drives bulk revocation.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair, REFRESH_SECRET_BYTES};
use crate::domain::entities::user::UserIdentity;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{RevocationRegistry, TokenRepository};

use super::config::{TokenServiceConfig, MIN_SECRET_LENGTH};
use super::keys;

/// Service managing JWT access tokens and opaque refresh tokens
pub struct TokenService<R, G>
where
    R: TokenRepository,
    G: RevocationRegistry,
{
    repository: Arc<R>,
    registry: Arc<G>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R, G> TokenService<R, G>
where
    R: TokenRepository,
    G: RevocationRegistry,
{
    /// Creates a new token service.
    ///
    /// Fails with `SigningKeyMisconfigured` when the secret is too short;
    /// this is a startup-time failure, never a per-request one.
    pub fn new(
        repository: Arc<R>,
        registry: Arc<G>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        if config.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::SigningKeyMisconfigured {
                reason: format!("secret shorter than {} bytes", MIN_SECRET_LENGTH),
            }
            .into());
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[&config.issuer]);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            repository,
            registry,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Mints a new access/refresh pair for an identity.
    ///
    /// Persists the hashed refresh row, then records the fresh `jti` as
    /// issuance bookkeeping in the registry. The bookkeeping write is not a
    /// failure path: the only error this returns is store unavailability.
    pub async fn issue_tokens(&self, identity: &UserIdentity) -> Result<TokenPair, DomainError> {
        let claims = Claims::new_access_token(
            identity,
            &self.config.issuer,
            self.config.audience_claim(),
            self.config.access_token_lifetime,
        );
        let access_token = self.encode_jwt(&claims)?;

        let refresh_secret = generate_refresh_secret();
        let row = RefreshToken::new(
            identity.id,
            hash_token(&refresh_secret),
            self.config.refresh_token_lifetime,
        );
        self.repository.create(row).await?;

        let issued = keys::issued_key(identity.id, &claims.jti);
        if let Err(error) = self
            .registry
            .set(
                &issued,
                &claims.exp.to_string(),
                self.config.access_token_lifetime as u64,
            )
            .await
        {
            warn!(user_id = %identity.id, %error, "failed to record issued jti");
        }

        Ok(TokenPair::new(
            access_token,
            refresh_secret,
            self.config.access_token_lifetime,
        ))
    }

    /// Consumes a refresh token, returning the owning user ID.
    ///
    /// The row is looked up by digest, checked for expiry and prior
    /// revocation, then flipped revoked through the repository's atomic
    /// conditional update. Losing that race fails the call: at most one
    /// concurrent caller ever gets `Ok` for the same secret.
    pub async fn consume_refresh_token(&self, refresh_secret: &str) -> Result<Uuid, DomainError> {
        let token_hash = hash_token(refresh_secret);

        let token = self
            .repository
            .find_by_hash(&token_hash)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        if token.is_expired() {
            return Err(TokenError::RefreshTokenExpired.into());
        }
        if token.is_revoked {
            return Err(TokenError::TokenRevoked.into());
        }

        if !self.repository.conditional_revoke(&token_hash).await? {
            // Lost the race against a concurrent rotation
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(token.user_id)
    }

    /// Revokes every live credential of a user.
    ///
    /// Refresh rows go first, in one batch, so there is no partial window.
    /// Then every still-live issued jti gets a blacklist entry whose TTL is
    /// the remaining time to that token's own expiry. Idempotent.
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked_rows = self.repository.revoke_all_for_user(user_id).await?;

        let now = Utc::now().timestamp();
        let issued = self
            .registry
            .scan_prefix(&keys::issued_prefix(user_id))
            .await?;

        for (key, exp_value) in issued {
            let Some(jti) = keys::jti_from_issued_key(&key) else {
                continue;
            };
            let Ok(exp) = exp_value.parse::<i64>() else {
                warn!(%key, %exp_value, "issued entry carries unparseable expiry");
                continue;
            };

            let remaining = exp - now;
            if remaining <= 0 {
                continue; // already dead on its own
            }

            self.registry
                .set(&keys::revoked_key(jti), "1", remaining as u64)
                .await?;
        }

        Ok(revoked_rows)
    }

    /// Verifies an access token's signature, expiry, issuer and audience
    /// with zero clock skew, returning the claims.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;

        Ok(data.claims)
    }

    /// Access token lifetime in seconds, as configured
    pub fn access_token_lifetime(&self) -> i64 {
        self.config.access_token_lifetime
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }
}

/// SHA-256 hex digest of a refresh secret, the only form kept at rest
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 256 bits of OS randomness, base64url without padding.
///
/// The value is opaque: never parsed, only hashed and compared.
fn generate_refresh_secret() -> String {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
