//! Key scheme for the revocation registry.
//!
//! Issuance bookkeeping and the revocation blacklist live in distinct
//! namespaces, so a freshly issued token is never rejected by its own
//! bookkeeping entry. Issued entries carry the token's `exp` timestamp as
//! their value so bulk revocation can compute the residual TTL.

use uuid::Uuid;

/// Namespace for issuance bookkeeping entries
pub const ISSUED_NAMESPACE: &str = "session:issued";

/// Namespace for revoked access token identifiers
pub const REVOKED_NAMESPACE: &str = "session:revoked";

/// Bookkeeping key for an issued access token
pub fn issued_key(user_id: Uuid, jti: &str) -> String {
    format!("{}:{}:{}", ISSUED_NAMESPACE, user_id, jti)
}

/// Prefix covering every issued-token entry of one user
pub fn issued_prefix(user_id: Uuid) -> String {
    format!("{}:{}:", ISSUED_NAMESPACE, user_id)
}

/// Blacklist key for a revoked access token
pub fn revoked_key(jti: &str) -> String {
    format!("{}:{}", REVOKED_NAMESPACE, jti)
}

/// Extract the jti back out of an issued-token key
pub fn jti_from_issued_key(key: &str) -> Option<&str> {
    key.rsplit(':').next().filter(|jti| !jti.is_empty())
}
