//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Authentication-level failures surfaced to the caller
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Token validation and lifecycle failures
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The persistent token store is unreachable or failed
    #[error("Token store unavailable: {message}")]
    Store { message: String },

    /// The revocation registry is unreachable or failed
    #[error("Revocation registry unavailable: {message}")]
    Registry { message: String },

    /// Anything else that should never reach a caller as-is
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Convenience constructor for store failures
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::Store {
            message: message.into(),
        }
    }

    /// Convenience constructor for registry failures
    pub fn registry(message: impl Into<String>) -> Self {
        DomainError::Registry {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
