//! MySQL implementation of the credential store port.
//!
//! Accounts live in a `users` table owned by the wider platform; this
//! adapter only authenticates and resolves identities. Passwords are
//! compared by SHA-256 digest, the same digest discipline the token store
//! uses for refresh secrets.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use dp_core::domain::entities::user::{Role, UserIdentity};
use dp_core::errors::{AuthError, DomainError};
use dp_core::repositories::CredentialStore;

/// MySQL-backed CredentialStore
pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn hash_password(password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<UserIdentity, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("Failed to get id: {}", e)))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| DomainError::store(format!("Failed to get email: {}", e)))?;
        let roles: String = row
            .try_get("roles")
            .map_err(|e| DomainError::store(format!("Failed to get roles: {}", e)))?;

        let id = Uuid::parse_str(&id)
            .map_err(|e| DomainError::store(format!("Invalid user UUID: {}", e)))?;

        // Unknown role strings are skipped rather than failing the login.
        let roles: Vec<Role> = roles
            .split(',')
            .filter_map(|r| Role::parse(r.trim()))
            .collect();

        Ok(UserIdentity::new(id, email, roles))
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, DomainError> {
        let query = r#"
            SELECT id, email, roles, password_digest, email_confirmed
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to look up user: {}", e)))?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored_digest: String = row
            .try_get("password_digest")
            .map_err(|e| DomainError::store(format!("Failed to get password_digest: {}", e)))?;

        if stored_digest != Self::hash_password(password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let confirmed: bool = row
            .try_get("email_confirmed")
            .map_err(|e| DomainError::store(format!("Failed to get email_confirmed: {}", e)))?;

        if !confirmed {
            return Err(AuthError::EmailNotConfirmed.into());
        }

        Self::row_to_identity(&row)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError> {
        let query = r#"
            SELECT id, email, roles
            FROM users
            WHERE id = ? AND email_confirmed = TRUE
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("Failed to find user: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_identity(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MySqlCredentialStore;

    #[test]
    fn password_digest_is_hex_sha256() {
        let digest = MySqlCredentialStore::hash_password("Secret!1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
