use actix_web::{web, HttpResponse};
use validator::Validate;

use dp_core::repositories::{CredentialStore, RevocationRegistry, TokenRepository};
use dp_shared::types::response::ErrorResponse;

use crate::app::AppState;
use crate::dto::auth_dto::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error_handler::handle_domain_error;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates a refresh token: the presented secret is consumed and a new
/// pair is returned. Presenting the same secret twice is a 401.
///
/// # Responses
/// - 200: `{access_token, refresh_token, expires_in}`
/// - 400: Empty refresh token
/// - 401: Unknown, expired, or already-used refresh token
pub async fn refresh<C, R, G>(
    state: web::Data<AppState<C, R, G>>,
    request: web::Json<RefreshTokenRequest>,
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

    match state.session_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }),
        Err(error) => handle_domain_error(error),
    }
}
