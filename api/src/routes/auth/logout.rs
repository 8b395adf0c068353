use actix_web::{web, HttpResponse};

use dp_core::repositories::{CredentialStore, RevocationRegistry, TokenRepository};

use crate::app::AppState;
use crate::dto::auth_dto::LogoutResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every live refresh token of the caller and blacklists all
/// outstanding access tokens until they expire. Requires a valid,
/// unrevoked Bearer token.
///
/// # Responses
/// - 200: `{message, revoked_sessions}`
/// - 401: Missing, invalid, or revoked access token
pub async fn logout<C, R, G>(
    state: web::Data<AppState<C, R, G>>,
    context: AuthContext,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    R: TokenRepository + 'static,
    G: RevocationRegistry + 'static,
{
    match state.session_service.revoke_user(context.user_id).await {
        Ok(revoked_sessions) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out".to_string(),
            revoked_sessions,
        }),
        Err(error) => handle_domain_error(error),
    }
}
