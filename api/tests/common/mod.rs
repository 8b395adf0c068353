#![allow(dead_code)]

//! Shared fixtures for the API integration tests: mock-backed application
//! state and a token service to mint credentials with.

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use dp_api::app::AppState;
use dp_core::domain::entities::user::{Role, UserIdentity};
use dp_core::repositories::{MockCredentialStore, MockRevocationRegistry, MockTokenRepository};
use dp_core::services::session::SessionService;
use dp_core::services::token::{TokenService, TokenServiceConfig};
use dp_shared::config::auth::JwtConfig;

pub type MockState = AppState<MockCredentialStore, MockTokenRepository, MockRevocationRegistry>;

pub struct TestEnv {
    pub state: web::Data<MockState>,
    pub jwt: JwtConfig,
    pub credentials: Arc<MockCredentialStore>,
    pub registry: Arc<MockRevocationRegistry>,
    pub token_service: Arc<TokenService<MockTokenRepository, MockRevocationRegistry>>,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new("integration-test-secret-0123456789abcdef")
}

pub fn test_env() -> TestEnv {
    let jwt = jwt_config();

    let credentials = Arc::new(MockCredentialStore::new());
    let repository = Arc::new(MockTokenRepository::new());
    let registry = Arc::new(MockRevocationRegistry::new());

    let token_service = Arc::new(
        TokenService::new(
            repository,
            Arc::clone(&registry),
            TokenServiceConfig::from(jwt.clone()),
        )
        .expect("test jwt config must be valid"),
    );
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&credentials),
        Arc::clone(&token_service),
    ));

    let state = web::Data::new(AppState {
        session_service,
        registry: Arc::clone(&registry),
    });

    TestEnv {
        state,
        jwt,
        credentials,
        registry,
        token_service,
    }
}

pub async fn test_env_with_user(
    email: &str,
    password: &str,
    roles: Vec<Role>,
) -> (TestEnv, UserIdentity) {
    let env = test_env();
    let identity = UserIdentity::new(Uuid::new_v4(), email, roles);
    env.credentials.add_account(identity.clone(), password).await;
    (env, identity)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
