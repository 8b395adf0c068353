mod service_tests;

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::{Role, UserIdentity};
use crate::repositories::{MockCredentialStore, MockRevocationRegistry, MockTokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::SessionService;

pub(crate) type TestSessionService =
    SessionService<MockCredentialStore, MockTokenRepository, MockRevocationRegistry>;

pub(crate) struct Fixture {
    pub service: TestSessionService,
}

pub(crate) async fn fixture_with_user(email: &str, password: &str) -> (Fixture, UserIdentity) {
    let identity = UserIdentity::new(Uuid::new_v4(), email, vec![Role::User]);

    let credentials = Arc::new(MockCredentialStore::new());
    credentials.add_account(identity.clone(), password).await;

    let repository = Arc::new(MockTokenRepository::new());
    let registry = Arc::new(MockRevocationRegistry::new());
    let token_service = Arc::new(
        TokenService::new(repository, registry, TokenServiceConfig::default())
            .expect("test config must be valid"),
    );

    let fixture = Fixture {
        service: SessionService::new(credentials, token_service),
    };

    (fixture, identity)
}
