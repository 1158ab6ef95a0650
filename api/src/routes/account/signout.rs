use actix_web::{web, HttpResponse};

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::{AuthUser, Ctx};

use super::AppState;

/// Handler for POST /signout
///
/// Revokes every refresh token of the user. Identity tokens already issued
/// stay valid until they expire.
pub async fn sign_out<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    AuthUser(user): AuthUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    state.token_service.sign_out(&ctx, user.uid).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("user signed out successfully")))
}
