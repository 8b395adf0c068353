//! Application state and factory.
//!
//! `create_app` builds the full route tree for a given set of port
//! implementations; production wires the MySQL/Redis adapters, tests wire
//! the in-memory mocks from `dp_core`.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use dp_core::repositories::{CredentialStore, RevocationRegistry, TokenRepository};
use dp_core::services::session::SessionService;
use dp_shared::config::auth::JwtConfig;
use dp_shared::types::response::ErrorResponse;

use crate::middleware::auth::JwtAuth;
use crate::middleware::revocation::RevocationGate;
use crate::routes::admin::revoke::revoke_user;
use crate::routes::auth::{login::login, logout::logout, refresh::refresh};

/// Shared services behind the handlers
pub struct AppState<C, R, G>
where
    C: CredentialStore,
    R: TokenRepository,
    G: RevocationRegistry,
{
    pub session_service: Arc<SessionService<C, R, G>>,
    pub registry: Arc<G>,
}

/// Create and configure the application with all routes and middleware.
///
/// Login and refresh are anonymous; logout and the admin surface sit
/// behind JWT validation plus the revocation gate, in that order.
pub fn create_app<C, R, G>(
    app_state: web::Data<AppState<C, R, G>>,
    jwt_config: &JwtConfig,
    fail_open: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: CredentialStore + 'static,
    R: TokenRepository + 'static,
    G: RevocationRegistry + 'static,
{
    let jwt_auth = JwtAuth::from_config(jwt_config);
    let registry = Arc::clone(&app_state.registry);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::<C, R, G>))
                        .route("/refresh", web::post().to(refresh::<C, R, G>))
                        .service(
                            // Middleware runs in reverse registration
                            // order: JwtAuth first, then the gate.
                            web::scope("/logout")
                                .wrap(RevocationGate::new(Arc::clone(&registry)).fail_open(fail_open))
                                .wrap(jwt_auth.clone())
                                .route("", web::post().to(logout::<C, R, G>)),
                        ),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RevocationGate::new(registry).fail_open(fail_open))
                        .wrap(jwt_auth)
                        .route("/revoke/{user_id}", web::post().to(revoke_user::<C, R, G>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "devpath-auth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
