use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::{CredentialsRequest, TokensResponse};
use crate::handlers::ApiError;
use crate::middleware::Ctx;

use super::AppState;

/// Handler for POST /signup
///
/// Creates the account and signs it in.
///
/// ## Success (201 Created)
/// ```json
/// { "tokens": { "idToken": "eyJ...", "refreshToken": "eyJ..." } }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid email or password length
/// - 409 Conflict: email already registered
pub async fn sign_up<U, T, I>(
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
        .sign_up(&ctx, &request.email, &request.password)
        .await?;

    let tokens = state
        .token_service
        .new_pair_from_user(&ctx, &user, None)
        .await?;

    Ok(HttpResponse::Created().json(TokensResponse { tokens }))
}
