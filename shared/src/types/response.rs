//! Wire-level error response structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub error: String,

    /// Human-readable description
    pub message: String,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create an error response with a code and message
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_code_and_message() {
        let response = ErrorResponse::new("invalid_credentials", "Invalid email or password");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"invalid_credentials\""));
        assert!(json.contains("\"Invalid email or password\""));
    }
}
