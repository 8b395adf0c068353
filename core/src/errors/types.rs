//! Error type definitions for authentication and token management
//!
//! Presentation-layer mapping to HTTP statuses and wire codes lives in the
//! api crate; these enums only name the failure.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address not confirmed")]
    EmailNotConfirmed,

    #[error("Session expired")]
    SessionExpired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing key misconfigured: {reason}")]
    SigningKeyMisconfigured { reason: String },
}

impl TokenError {
    /// Whether the failure means the presented refresh token can never be
    /// used again, as opposed to a server-side fault.
    pub fn is_refresh_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::TokenRevoked
                | TokenError::RefreshTokenExpired
                | TokenError::InvalidRefreshToken
        )
    }
}
