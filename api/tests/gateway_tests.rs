//! Revocation gateway tests: the middleware pair in isolation, in front of
//! a trivial probe route.

mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};

use dp_api::middleware::{JwtAuth, RevocationGate};
use dp_core::domain::entities::user::{Role, UserIdentity};
use dp_core::repositories::RevocationRegistry;
use dp_core::services::token::keys;
use uuid::Uuid;

use common::{bearer, test_env, TestEnv};

async fn probe() -> HttpResponse {
    HttpResponse::Ok().finish()
}

macro_rules! gate_app {
    ($env:expr, $fail_open:expr) => {
        test::init_service(
            App::new()
                .wrap(RevocationGate::new(Arc::clone(&$env.registry)).fail_open($fail_open))
                .wrap(JwtAuth::from_config(&$env.jwt))
                .route("/probe", web::get().to(probe)),
        )
        .await
    };
}

async fn minted_token(env: &TestEnv) -> (String, String) {
    let identity = UserIdentity::new(Uuid::new_v4(), "gate@x.com", vec![Role::User]);
    let pair = env.token_service.issue_tokens(&identity).await.unwrap();
    let claims = env
        .token_service
        .verify_access_token(&pair.access_token)
        .unwrap();
    (pair.access_token, claims.jti)
}

#[actix_web::test]
async fn valid_token_passes_the_gate() {
    let env = test_env();
    let app = gate_app!(env, false);
    let (token, _) = minted_token(&env).await;

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_bearer_is_401() {
    let env = test_env();
    let app = gate_app!(env, false);

    let req = test::TestRequest::get().uri("/probe").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_401() {
    let env = test_env();
    let app = gate_app!(env, false);

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn revoked_jti_is_rejected() {
    let env = test_env();
    let app = gate_app!(env, false);
    let (token, jti) = minted_token(&env).await;

    env.registry
        .set(&keys::revoked_key(&jti), "1", 60)
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn issued_but_unrevoked_jti_passes() {
    // Issuance bookkeeping lives under a different namespace than the
    // blacklist; merely having been issued must not read as revoked.
    let env = test_env();
    let app = gate_app!(env, false);
    let (token, _) = minted_token(&env).await;

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn registry_outage_fails_closed() {
    let env = test_env();
    let app = gate_app!(env, false);
    let (token, _) = minted_token(&env).await;

    env.registry.set_unavailable(true).await;

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn registry_outage_with_fail_open_passes() {
    let env = test_env();
    let app = gate_app!(env, true);
    let (token, _) = minted_token(&env).await;

    env.registry.set_unavailable(true).await;

    let req = test::TestRequest::get()
        .uri("/probe")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
