use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::{DetailsRequest, UserResponse};
use crate::handlers::ApiError;
use crate::middleware::{AuthUser, Ctx};

use super::AppState;

/// Handler for PUT /details
///
/// ## Errors
/// - 400 Bad Request: name longer than 40 characters, invalid email or website
/// - 409 Conflict: email belongs to another account
pub async fn details<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    AuthUser(user): AuthUser,
    request: web::Json<DetailsRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    request.validate()?;

    let user = state
        .account_service
        .update_details(&ctx, user.uid, request.into_inner().into())
        .await?;

    tracing::info!(user_id = %user.uid, "Updated user details");
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
