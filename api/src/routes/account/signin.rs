use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::{CredentialsRequest, TokensResponse};
use crate::handlers::ApiError;
use crate::middleware::Ctx;

use super::AppState;

/// Handler for POST /signin
///
/// ## Errors
/// - 400 Bad Request: invalid email or password length
/// - 401 Unauthorized: unknown email or wrong password
pub async fn sign_in<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    request.validate()?;

    let user = state
        .account_service
        .sign_in(&ctx, &request.email, &request.password)
        .await?;

    let tokens = state
        .token_service
        .new_pair_from_user(&ctx, &user, None)
        .await?;

    Ok(HttpResponse::Ok().json(TokensResponse { tokens }))
}
