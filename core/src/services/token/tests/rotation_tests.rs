//! Rotation and bulk-revocation tests: single-use refresh semantics.

use std::sync::Arc;

use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRegistry;
use crate::services::token::keys;

use super::{fixture, identity};

#[tokio::test]
async fn consume_returns_owner_and_kills_token() {
    let f = fixture();
    let id = identity();
    let pair = f.service.issue_tokens(&id).await.unwrap();

    let user_id = f
        .service
        .consume_refresh_token(&pair.refresh_token)
        .await
        .unwrap();
    assert_eq!(user_id, id.id);

    let again = f.service.consume_refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        again,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

#[tokio::test]
async fn unknown_secret_rejected() {
    let f = fixture();

    let result = f.service.consume_refresh_token("not-a-real-secret").await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn expired_refresh_token_rejected() {
    let f = fixture();
    let secret = "an-expired-refresh-secret";

    // Seed a row that expired an hour ago
    let row = crate::domain::entities::token::RefreshToken::new(
        uuid::Uuid::new_v4(),
        super::super::service::hash_token(secret),
        -3600,
    );
    {
        use crate::repositories::TokenRepository;
        f.repository.create(row).await.unwrap();
    }

    let result = f.service.consume_refresh_token(secret).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenExpired))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rotations_have_exactly_one_winner() {
    let f = fixture();
    let id = identity();
    let pair = f.service.issue_tokens(&id).await.unwrap();
    let service = Arc::new(f.service);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        let secret = pair.refresh_token.clone();
        handles.push(tokio::spawn(async move {
            service.consume_refresh_token(&secret).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(user_id) => {
                assert_eq!(user_id, id.id);
                winners += 1;
            }
            Err(DomainError::Token(e)) => assert!(e.is_refresh_rejection()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn revoke_all_kills_every_refresh_token() {
    let f = fixture();
    let id = identity();

    let first = f.service.issue_tokens(&id).await.unwrap();
    let second = f.service.issue_tokens(&id).await.unwrap();

    let revoked = f.service.revoke_all(id.id).await.unwrap();
    assert_eq!(revoked, 2);

    for secret in [first.refresh_token, second.refresh_token] {
        let result = f.service.consume_refresh_token(&secret).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::TokenRevoked))
        ));
    }
}

#[tokio::test]
async fn revoke_all_blacklists_live_jtis() {
    let f = fixture();
    let id = identity();

    let pair = f.service.issue_tokens(&id).await.unwrap();
    let claims = f.service.verify_access_token(&pair.access_token).unwrap();

    f.service.revoke_all(id.id).await.unwrap();

    assert!(f
        .registry
        .exists(&keys::revoked_key(&claims.jti))
        .await
        .unwrap());
}

#[tokio::test]
async fn issued_but_unrevoked_jti_not_blacklisted() {
    let f = fixture();
    let id = identity();

    let pair = f.service.issue_tokens(&id).await.unwrap();
    let claims = f.service.verify_access_token(&pair.access_token).unwrap();

    assert!(!f
        .registry
        .exists(&keys::revoked_key(&claims.jti))
        .await
        .unwrap());
}

#[tokio::test]
async fn revoke_all_twice_is_a_no_op() {
    let f = fixture();
    let id = identity();
    f.service.issue_tokens(&id).await.unwrap();

    assert_eq!(f.service.revoke_all(id.id).await.unwrap(), 1);
    assert_eq!(f.service.revoke_all(id.id).await.unwrap(), 0);
}

#[tokio::test]
async fn revoke_all_does_not_touch_other_users() {
    let f = fixture();
    let alice = identity();
    let bob = identity();

    f.service.issue_tokens(&alice).await.unwrap();
    let bob_pair = f.service.issue_tokens(&bob).await.unwrap();

    f.service.revoke_all(alice.id).await.unwrap();

    assert!(f
        .service
        .consume_refresh_token(&bob_pair.refresh_token)
        .await
        .is_ok());
}
