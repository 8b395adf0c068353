use actix_web::{web, HttpResponse};
use validator::Validate;

use dp_core::repositories::{CredentialStore, RevocationRegistry, TokenRepository};
use dp_shared::types::response::ErrorResponse;

use crate::app::AppState;
use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::handlers::error_handler::handle_domain_error;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates an email/password pair and returns a fresh token pair.
///
/// # Responses
/// - 200: `{access_token, refresh_token, expires_in}`
/// - 400: Malformed email or password
/// - 401: Invalid credentials or unconfirmed email
pub async fn login<C, R, G>(
    state: web::Data<AppState<C, R, G>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    R: TokenRepository + 'static,
    G: RevocationRegistry + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", errors.to_string()));
    }

    match state
        .session_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(error) => handle_domain_error(error),
    }
}
