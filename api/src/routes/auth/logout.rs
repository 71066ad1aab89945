use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use fl_core::repositories::TokenRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every refresh token of the authenticated user. Access tokens
/// already issued stay valid until they expire.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 503 Service Unavailable: Token store failure
pub async fn logout<T>(state: web::Data<AppState<T>>, auth: AuthContext) -> HttpResponse
where
    T: TokenRepository + 'static,
{
    match state.token_service.revoke_all_sessions(&auth.user_id).await {
        Ok(revoked) => {
            log::info!("User {} logged out, {} session(s) revoked", auth.user_id, revoked);
            HttpResponse::Ok().json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
