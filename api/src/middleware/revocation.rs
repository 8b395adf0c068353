//! Revocation gateway middleware.
//!
//! Runs after [`JwtAuth`](super::auth::JwtAuth): takes the verified `jti`
//! from the request's `AuthContext` and rejects the request if that jti is
//! blacklisted in the revocation registry. A token can be cryptographically
//! valid and still dead; this is where that is enforced.
//!
//! When the registry itself is unreachable the gate fails closed (503)
//! unless `fail_open` was configured, in which case the request proceeds
//! and the outage is logged.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use dp_core::errors::{DomainError, TokenError};
use dp_core::repositories::RevocationRegistry;
use dp_core::services::token::keys;

use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Revocation gateway middleware factory
pub struct RevocationGate<G: RevocationRegistry> {
    registry: Arc<G>,
    fail_open: bool,
}

impl<G: RevocationRegistry> RevocationGate<G> {
    /// Fail-closed gate over the given registry.
    pub fn new(registry: Arc<G>) -> Self {
        Self {
            registry,
            fail_open: false,
        }
    }

    /// Let requests through when the registry is unreachable.
    ///
    /// Revoked-but-unexpired tokens regain access for the duration of the
    /// outage; only deployments that prefer availability should set this.
    pub fn fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }
}

impl<S, B, G> Transform<S, ServiceRequest> for RevocationGate<G>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    G: RevocationRegistry + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RevocationGateMiddleware<S, G>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RevocationGateMiddleware {
            service: Rc::new(service),
            registry: Arc::clone(&self.registry),
            fail_open: self.fail_open,
        }))
    }
}

/// Revocation gateway middleware service
pub struct RevocationGateMiddleware<S, G: RevocationRegistry> {
    service: Rc<S>,
    registry: Arc<G>,
    fail_open: bool,
}

impl<S, B, G> Service<ServiceRequest> for RevocationGateMiddleware<S, G>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    G: RevocationRegistry + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let registry = Arc::clone(&self.registry);
        let fail_open = self.fail_open;

        Box::pin(async move {
            let jti = req
                .extensions()
                .get::<AuthContext>()
                .map(|context| context.jti.clone());
            let jti = match jti {
                Some(jti) => jti,
                None => {
                    log::error!("Revocation gate reached without an AuthContext");
                    let response = handle_domain_error(DomainError::Internal {
                        message: "route misconfiguration".to_string(),
                    });
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            match registry.exists(&keys::revoked_key(&jti)).await {
                Ok(true) => {
                    log::info!("Rejected revoked token jti={}", jti);
                    let response = handle_domain_error(TokenError::TokenRevoked.into());
                    Ok(req.into_response(response).map_into_right_body())
                }
                Ok(false) => service.call(req).await.map(|res| res.map_into_left_body()),
                Err(e) if fail_open => {
                    log::error!("Revocation registry unavailable, failing open: {}", e);
                    service.call(req).await.map(|res| res.map_into_left_body())
                }
                Err(e) => {
                    log::error!("Revocation registry unavailable, failing closed: {}", e);
                    let response =
                        handle_domain_error(DomainError::registry("registry check failed"));
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
