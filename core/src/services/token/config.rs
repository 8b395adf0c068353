//! Token service configuration

use dp_shared::config::JwtConfig;

/// Minimum accepted HS256 secret length in bytes
pub(crate) const MIN_SECRET_LENGTH: usize = 32;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric secret for HS256 signing
    pub jwt_secret: String,

    /// Fixed issuer claim
    pub issuer: String,

    /// Fixed audience claim; verification of `aud` is disabled when unset
    pub audience: Option<String>,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,
}

impl TokenServiceConfig {
    /// The audience string written into claims
    pub fn audience_claim(&self) -> &str {
        self.audience.as_deref().unwrap_or_default()
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(jwt: JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret,
            issuer: jwt.issuer,
            audience: jwt.audience,
            access_token_lifetime: jwt.access_token_lifetime,
            refresh_token_lifetime: jwt.refresh_token_lifetime,
        }
    }
}

#[cfg(test)]
impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-with-enough-length-for-hs256".to_string(),
            issuer: "devpath".to_string(),
            audience: Some("devpath-api".to_string()),
            access_token_lifetime: 3600,
            refresh_token_lifetime: 7 * 86400,
        }
    }
}
