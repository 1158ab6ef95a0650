use actix_web::{web, HttpResponse};

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::UserResponse;
use crate::handlers::ApiError;
use crate::middleware::{AuthUser, Ctx};

use super::AppState;

/// Handler for GET /me
///
/// Reads the user from the store rather than trusting the token, so profile
/// changes made since sign-in are visible.
pub async fn me<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    AuthUser(user): AuthUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let user = state.account_service.get(&ctx, user.uid).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
