//! In-memory credential store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserIdentity;
use crate::errors::{AuthError, DomainError};

use super::r#trait::CredentialStore;

struct Account {
    identity: UserIdentity,
    password: String,
    email_confirmed: bool,
}

/// Mock credential store seeded with plaintext accounts.
///
/// Real password storage is out of scope for this subsystem, so the mock
/// compares plaintext; it exists to drive the session service in tests.
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MockCredentialStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account
    pub async fn add_account(&self, identity: UserIdentity, password: impl Into<String>) {
        self.insert(identity, password.into(), true).await;
    }

    /// Register an account whose email has not been confirmed yet
    pub async fn add_unconfirmed_account(
        &self,
        identity: UserIdentity,
        password: impl Into<String>,
    ) {
        self.insert(identity, password.into(), false).await;
    }

    async fn insert(&self, identity: UserIdentity, password: String, email_confirmed: bool) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(
            identity.email.clone(),
            Account {
                identity,
                password,
                email_confirmed,
            },
        );
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, DomainError> {
        let accounts = self.accounts.read().await;

        let account = accounts
            .get(email)
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.email_confirmed {
            return Err(AuthError::EmailNotConfirmed.into());
        }

        Ok(account.identity.clone())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserIdentity>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.identity.id == user_id)
            .map(|account| account.identity.clone()))
    }
}
