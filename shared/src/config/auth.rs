//! JWT signing and token lifetime configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HS256 signing
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,

    /// Fixed issuer claim, enforced by the verifier
    pub issuer: String,

    /// Fixed audience claim, enforced by the verifier when set
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            access_token_lifetime: 3600,       // 1 hour
            refresh_token_lifetime: 7 * 86400, // 7 days
            issuer: String::from("devpath"),
            audience: Some(String::from("devpath-api")),
        }
    }
}

impl JwtConfig {
    /// Create a new configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.access_token_lifetime = minutes * 60;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_lifetime_days(mut self, days: i64) -> Self {
        self.refresh_token_lifetime = days * 86400;
        self
    }

    /// Whether the default development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_lifetime: std::env::var("JWT_ACCESS_TOKEN_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_lifetime),
            refresh_token_lifetime: std::env::var("JWT_REFRESH_TOKEN_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_lifetime),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").ok().or(defaults.audience),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lifetimes() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_lifetime, 3600);
        assert_eq!(config.refresh_token_lifetime, 604800);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn builder_lifetimes() {
        let config = JwtConfig::new("a-real-secret")
            .with_access_lifetime_minutes(30)
            .with_refresh_lifetime_days(14);

        assert_eq!(config.access_token_lifetime, 1800);
        assert_eq!(config.refresh_token_lifetime, 1209600);
        assert!(!config.is_using_default_secret());
    }
}
