mod rotation_tests;

use std::sync::Arc;

use crate::domain::entities::user::{Role, UserIdentity};
use crate::repositories::{MockRevocationRegistry, MockTokenRepository};
use uuid::Uuid;

use super::{TokenService, TokenServiceConfig};

pub(crate) type TestTokenService = TokenService<MockTokenRepository, MockRevocationRegistry>;

pub(crate) struct Fixture {
    pub service: TestTokenService,
    pub repository: Arc<MockTokenRepository>,
    pub registry: Arc<MockRevocationRegistry>,
}

pub(crate) fn fixture() -> Fixture {
    fixture_with_config(TokenServiceConfig::default())
}

pub(crate) fn fixture_with_config(config: TokenServiceConfig) -> Fixture {
    let repository = Arc::new(MockTokenRepository::new());
    let registry = Arc::new(MockRevocationRegistry::new());
    let service = TokenService::new(repository.clone(), registry.clone(), config)
        .expect("test config must be valid");

    Fixture {
        service,
        repository,
        registry,
    }
}

pub(crate) fn identity() -> UserIdentity {
    UserIdentity::new(Uuid::new_v4(), "u@x.com", vec![Role::User])
}
