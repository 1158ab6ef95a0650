use actix_multipart::Multipart;
use actix_web::{http::header::CONTENT_LENGTH, web, HttpRequest, HttpResponse};
use futures_util::StreamExt;

use acct_core::domain::ProfileImage;
use acct_core::errors::DomainError;
use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};

use crate::dto::{ImageResponse, MessageResponse};
use crate::handlers::ApiError;
use crate::middleware::{AuthUser, Ctx};

use super::AppState;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "imageFile";

/// Handler for POST /image
///
/// Expects `multipart/form-data` with an `imageFile` part of type
/// `image/jpeg` or `image/png`.
///
/// ## Success (200 OK)
/// ```json
/// { "imageUrl": "https://...", "message": "Profile image updated successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing part, unparsable body or unsupported type
/// - 413 Payload Too Large: body above the configured limit
pub async fn upload_image<U, T, I>(
    req: HttpRequest,
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    AuthUser(user): AuthUser,
    payload: Multipart,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let max_bytes = state.max_body_bytes;
    if declared_length(&req).is_some_and(|length| length > max_bytes) {
        return Err(DomainError::PayloadTooLarge { max_bytes }.into());
    }

    let image = read_image(payload, max_bytes).await?;
    let user = state
        .account_service
        .set_profile_image(&ctx, user.uid, &image)
        .await?;

    tracing::info!(user_id = %user.uid, size = image.len(), "Updated profile image");
    Ok(HttpResponse::Ok().json(ImageResponse {
        image_url: user.image_url,
        message: "Profile image updated successfully".to_string(),
    }))
}

/// Handler for DELETE /image
pub async fn delete_image<U, T, I>(
    state: web::Data<AppState<U, T, I>>,
    ctx: Ctx,
    AuthUser(user): AuthUser,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    state
        .account_service
        .clear_profile_image(&ctx, user.uid)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("success")))
}

fn declared_length(req: &HttpRequest) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Read the `imageFile` part, enforcing `max_bytes` while streaming
async fn read_image(mut payload: Multipart, max_bytes: usize) -> Result<ProfileImage, DomainError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;
        if field.name() != Some(IMAGE_FIELD) {
            while let Some(chunk) = field.next().await {
                chunk.map_err(multipart_error)?;
            }
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(multipart_error)?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(DomainError::PayloadTooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        let image = ProfileImage::new(content_type, bytes);
        if image.is_empty() {
            break;
        }
        return Ok(image);
    }

    Err(DomainError::validation("missing image file"))
}

fn multipart_error(error: actix_multipart::MultipartError) -> DomainError {
    tracing::debug!(error = %error, "Unable to parse multipart body");
    DomainError::validation("unable to parse multipart/form-data")
}
