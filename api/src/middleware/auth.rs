//! JWT authentication middleware.
//!
//! Extracts the Bearer token from the Authorization header, verifies the
//! signature and standard claims, and injects an [`AuthContext`] into the
//! request extensions for handlers and downstream middleware.
//!
//! Signature and claim checks happen here; whether the token has been
//! revoked is the revocation gate's job, which runs after this middleware.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use dp_core::domain::entities::token::Claims;
use dp_core::domain::entities::user::Role;
use dp_core::errors::{DomainError, TokenError};
use dp_shared::config::auth::JwtConfig;

use crate::handlers::error_handler::handle_domain_error;

/// Verified caller identity injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: Uuid,
    /// Email from the token claims
    pub email: String,
    /// Parsed roles; unknown role strings are dropped
    pub roles: Vec<Role>,
    /// JWT ID, the unit of revocation
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;

        Ok(Self {
            user_id,
            email: claims.email.clone(),
            roles: claims.parsed_roles(),
            jti: claims.jti,
        })
    }

    /// Whether the caller carries the admin role
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();

        ready(context.ok_or_else(|| {
            // Reaching here means the route was registered without JwtAuth
            log::error!("AuthContext requested on a route without JWT middleware");
            InternalError::from_response(
                "missing auth context",
                handle_domain_error(DomainError::Internal {
                    message: "route misconfiguration".to_string(),
                }),
            )
            .into()
        }))
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    /// Build the middleware from JWT configuration.
    ///
    /// Expiry is checked with zero leeway; issuer always, audience only
    /// when one is configured.
    pub fn from_config(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&config.issuer]);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            decoding_key: self.decoding_key.clone(),
            validation: self.validation.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let decoding_key = self.decoding_key.clone();
        let validation = self.validation.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(req
                        .into_response(unauthorized(TokenError::InvalidTokenFormat))
                        .map_into_right_body())
                }
            };

            let claims = match decode::<Claims>(&token, &decoding_key, &validation) {
                Ok(data) => data.claims,
                Err(e) => {
                    let error = match e.kind() {
                        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                        _ => TokenError::InvalidTokenFormat,
                    };
                    return Ok(req.into_response(unauthorized(error)).map_into_right_body());
                }
            };

            let context = match AuthContext::from_claims(claims) {
                Ok(context) => context,
                Err(_) => {
                    return Ok(req
                        .into_response(unauthorized(TokenError::InvalidTokenFormat))
                        .map_into_right_body())
                }
            };

            req.extensions_mut().insert(context);

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn unauthorized(error: TokenError) -> HttpResponse {
    let domain_error: DomainError = error.into();
    handle_domain_error(domain_error)
}
