use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    /// Number of refresh tokens revoked for this user
    pub revoked_sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub user_id: String,
    pub revoked_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn login_request_rejects_malformed_email() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "Secret!!1".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn login_request_rejects_short_password() {
        let request = LoginRequest {
            email: "u@x.com".to_string(),
            password: "short".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn refresh_request_rejects_empty_token() {
        let request = RefreshTokenRequest {
            refresh_token: String::new(),
        };

        assert!(request.validate().is_err());
    }
}
