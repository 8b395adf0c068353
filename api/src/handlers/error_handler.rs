//! Mapping from domain errors to HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};

use dp_core::errors::{AuthError, DomainError, TokenError};
use dp_shared::types::response::ErrorResponse;

/// Convert a domain error into its wire representation.
///
/// Authentication and token failures are 401 (403 for permission checks),
/// a registry outage is 503, everything touching the store or genuinely
/// unexpected is a 500 that hides the detail from the caller.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = match &error {
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password".to_string(),
            ),
            AuthError::EmailNotConfirmed => (
                StatusCode::UNAUTHORIZED,
                "email_not_confirmed",
                "Email address has not been confirmed".to_string(),
            ),
            AuthError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                "session_expired",
                "Session has expired, please sign in again".to_string(),
            ),
            AuthError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                "insufficient_permissions",
                "You do not have permission to perform this action".to_string(),
            ),
        },
        DomainError::Token(token) => match token {
            TokenError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "token_expired",
                "Access token has expired".to_string(),
            ),
            TokenError::TokenRevoked => (
                StatusCode::UNAUTHORIZED,
                "token_revoked",
                "Token has been revoked".to_string(),
            ),
            TokenError::RefreshTokenExpired => (
                StatusCode::UNAUTHORIZED,
                "refresh_token_expired",
                "Refresh token has expired".to_string(),
            ),
            TokenError::InvalidRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_refresh_token",
                "Refresh token is not recognized".to_string(),
            ),
            TokenError::InvalidTokenFormat | TokenError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Token is invalid".to_string(),
            ),
            TokenError::TokenGenerationFailed | TokenError::SigningKeyMisconfigured { .. } => {
                log::error!("Token issuance failure: {}", token);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        },
        DomainError::Registry { message } => {
            log::error!("Revocation registry unavailable: {}", message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "registry_unavailable",
                "Service temporarily unavailable".to_string(),
            )
        }
        DomainError::Store { message } => {
            log::error!("Token store failure: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "An internal error occurred".to_string(),
            )
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            )
        }
    };

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_maps_to_401() {
        let response = handle_domain_error(AuthError::InvalidCredentials.into());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn permission_failure_maps_to_403() {
        let response = handle_domain_error(AuthError::InsufficientPermissions.into());
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn registry_outage_maps_to_503() {
        let response = handle_domain_error(DomainError::registry("connection refused"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let response = handle_domain_error(DomainError::store("pool exhausted"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
