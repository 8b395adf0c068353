//! End-to-end session lifecycle tests against the in-memory ports.

use crate::errors::{AuthError, DomainError, TokenError};

use super::fixture_with_user;

#[tokio::test]
async fn login_returns_pair_for_valid_credentials() {
    let (f, _) = fixture_with_user("u@x.com", "Secret!1").await;

    let pair = f.service.login("u@x.com", "Secret!1").await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let (f, _) = fixture_with_user("u@x.com", "Secret!1").await;

    let result = f.service.login("u@x.com", "nope").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn refresh_rotates_and_kills_old_secret() {
    let (f, _) = fixture_with_user("u@x.com", "Secret!1").await;

    let first = f.service.login("u@x.com", "Secret!1").await.unwrap();
    let second = f.service.refresh(&first.refresh_token).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);

    // The old secret is single-use: presenting it again is a rejection
    let replay = f.service.refresh(&first.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));

    // The rotated secret still works
    assert!(f.service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn refresh_with_unknown_secret_rejected() {
    let (f, _) = fixture_with_user("u@x.com", "Secret!1").await;

    let result = f.service.refresh("never-issued").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn revoke_user_kills_outstanding_refresh_tokens() {
    let (f, identity) = fixture_with_user("u@x.com", "Secret!1").await;

    let pair = f.service.login("u@x.com", "Secret!1").await.unwrap();
    f.service.revoke_user(identity.id).await.unwrap();

    let result = f.service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn revoke_user_twice_is_idempotent() {
    let (f, identity) = fixture_with_user("u@x.com", "Secret!1").await;
    f.service.login("u@x.com", "Secret!1").await.unwrap();

    assert_eq!(f.service.revoke_user(identity.id).await.unwrap(), 1);
    assert_eq!(f.service.revoke_user(identity.id).await.unwrap(), 0);
}

#[tokio::test]
async fn refresh_fails_when_identity_no_longer_resolves() {
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::domain::entities::user::{Role, UserIdentity};
    use crate::repositories::{MockCredentialStore, MockRevocationRegistry, MockTokenRepository};
    use crate::services::session::SessionService;
    use crate::services::token::{TokenService, TokenServiceConfig};

    // Token state for a user the (empty) credential store cannot resolve,
    // modeling an account deleted after issuance.
    let token_service = Arc::new(
        TokenService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockRevocationRegistry::new()),
            TokenServiceConfig::default(),
        )
        .unwrap(),
    );
    let ghost = UserIdentity::new(Uuid::new_v4(), "gone@x.com", vec![Role::User]);
    let pair = token_service.issue_tokens(&ghost).await.unwrap();

    let service = SessionService::new(Arc::new(MockCredentialStore::new()), token_service);

    let result = service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}
