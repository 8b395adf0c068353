//! Token entities for JWT-based session management.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, UserIdentity};

/// Number of random bytes behind an opaque refresh secret
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Claims carried by a signed access token
///
/// The token itself is stateless; the server keeps only the `jti` for
/// revocation bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login email of the subject
    pub email: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Roles granted to the subject, in claim string form
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates claims for a new access token
    pub fn new_access_token(
        identity: &UserIdentity,
        issuer: &str,
        audience: &str,
        lifetime_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(lifetime_seconds);

        Self {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            jti: Uuid::new_v4().to_string(),
            roles: identity.roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Whether the claims have passed their expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The subject parsed back into a user ID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Roles parsed back from their claim string form; unknown strings are dropped
    pub fn parsed_roles(&self) -> Vec<Role> {
        self.roles.iter().filter_map(|r| Role::parse(r)).collect()
    }

    /// Seconds remaining until `exp`, zero if already past
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// Refresh token row as persisted by the token store
///
/// Rows are never deleted on revocation; `is_revoked` flips to true exactly
/// once and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the row
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// SHA-256 digest of the opaque secret; the secret itself is never stored
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been consumed or revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token row
    pub fn new(user_id: Uuid, token_hash: String, lifetime_seconds: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::seconds(lifetime_seconds),
            is_revoked: false,
        }
    }

    /// Whether the token is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the token can still be rotated
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Marks the token as revoked; monotonic, never reverts
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Access/refresh pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh secret, base64url over 32 random bytes
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a pair with the given access lifetime
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
