use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::{TokensRequest, TokensResponse};
use crate::handlers::ApiError;
use crate::middleware::Ctx;

use super::AppState;

/// Handler for POST /tokens
///
/// Exchanges a refresh token for a new pair. The presented refresh token is
/// revoked, so each one can be redeemed once. The identity token carries the
/// user as currently stored, not as embedded in the old token.
///
/// ## Errors
/// - 401 Unauthorized: refresh token invalid, expired, or already used
pub async fn tokens<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    request: web::Json<TokensRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    request.validate()?;

    let refresh = state
        .token_service
        .validate_refresh_token(&request.refresh_token)?;
    let user = state.account_service.get(&ctx, refresh.uid).await?;

    let tokens = state
        .token_service
        .new_pair_from_user(&ctx, &user, Some(refresh.id))
        .await?;

    Ok(HttpResponse::Ok().json(TokensResponse { tokens }))
}
