use actix_web::{web, HttpResponse};
use uuid::Uuid;

use dp_core::errors::AuthError;
use dp_core::repositories::{CredentialStore, RevocationRegistry, TokenRepository};

use crate::app::AppState;
use crate::dto::auth_dto::RevokeResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/admin/revoke/{user_id}
///
/// Kills every session of the target user: all their refresh tokens are
/// revoked and all their outstanding access tokens blacklisted. Caller
/// must hold the admin role.
///
/// # Responses
/// - 200: `{user_id, revoked_sessions}`
/// - 401: Missing, invalid, or revoked access token
/// - 403: Caller is not an admin
pub async fn revoke_user<C, R, G>(
    state: web::Data<AppState<C, R, G>>,
    context: AuthContext,
    user_id: web::Path<Uuid>,
) -> HttpResponse
where
    C: CredentialStore + 'static,
    R: TokenRepository + 'static,
    G: RevocationRegistry + 'static,
{
    if !context.is_admin() {
        return handle_domain_error(AuthError::InsufficientPermissions.into());
    }

    let user_id = user_id.into_inner();

    match state.session_service.revoke_user(user_id).await {
        Ok(revoked_sessions) => {
            log::info!(
                "Admin {} revoked all sessions of user {}",
                context.user_id,
                user_id
            );
            HttpResponse::Ok().json(RevokeResponse {
                user_id: user_id.to_string(),
                revoked_sessions,
            })
        }
        Err(error) => handle_domain_error(error),
    }
}
