//! Account service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::entities::image::{ProfileImage, ALLOWED_IMAGE_TYPES};
use crate::domain::entities::user::{User, UserDetails};
use crate::errors::DomainError;
use crate::repositories::{ImageRepository, UserRepository};

use super::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "invalid email/password combination";

/// Sign-up, sign-in and profile management over the user and image repositories
pub struct AccountService<U: UserRepository, I: ImageRepository> {
    users: Arc<U>,
    images: Arc<I>,
    hasher: PasswordHasher,
}

impl<U: UserRepository, I: ImageRepository> AccountService<U, I> {
    pub fn new(users: Arc<U>, images: Arc<I>) -> Self {
        Self::with_hasher(users, images, PasswordHasher::default())
    }

    pub fn with_hasher(users: Arc<U>, images: Arc<I>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            images,
            hasher,
        }
    }

    /// Fetch a user by id
    pub async fn get(&self, ctx: &RequestContext, uid: Uuid) -> Result<User, DomainError> {
        self.users.find_by_id(ctx, uid).await.map(|u| u.sanitized())
    }

    /// Register a new account
    ///
    /// Fails with `Conflict` when the email is already registered.
    pub async fn sign_up(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let hashed = self.hasher.hash(password).await.map_err(|e| {
            if let DomainError::Internal { message } = &e {
                tracing::error!(error = %message, event = "password_hash_failed", "Error hashing password");
            }
            e
        })?;

        let user = self.users.create(ctx, &User::new(email, hashed)).await?;
        tracing::info!(user_id = %user.uid, event = "user_signed_up", "Created account");
        Ok(user.sanitized())
    }

    /// Check credentials and return the stored user
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn sign_in(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let user = match self.users.find_by_email(ctx, email).await {
            Ok(user) => user,
            Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::unauthorized(INVALID_CREDENTIALS))
            }
            Err(e) => return Err(e),
        };

        let matches = self.hasher.verify(password, &user.password).await.map_err(|e| {
            tracing::error!(user_id = %user.uid, error = %e, event = "password_verify_failed", "Stored password hash is unusable");
            e
        })?;
        if !matches {
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user.sanitized())
    }

    /// Overwrite name, email and website
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        details: UserDetails,
    ) -> Result<User, DomainError> {
        let mut user = self.users.find_by_id(ctx, uid).await?;
        user.apply_details(details);
        self.users.update(ctx, &user).await.map(|u| u.sanitized())
    }

    /// Upload a new profile image, replacing the current one in place
    pub async fn set_profile_image(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        image: &ProfileImage,
    ) -> Result<User, DomainError> {
        if !image.is_allowed_type() {
            return Err(DomainError::validation(format!(
                "image type {} is not supported, use one of {}",
                image.content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let user = self.users.find_by_id(ctx, uid).await?;
        let object_name = object_name_from_url(&user.image_url);

        let image_url = self
            .images
            .update_profile(ctx, &object_name, image)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %uid, error = %e, event = "image_upload_failed", "Failed to store profile image");
                e
            })?;

        self.users
            .update_image(ctx, uid, &image_url)
            .await
            .map(|u| u.sanitized())
    }

    /// Delete the profile image, if any
    pub async fn clear_profile_image(&self, ctx: &RequestContext, uid: Uuid) -> Result<(), DomainError> {
        let user = self.users.find_by_id(ctx, uid).await?;
        if !user.has_image() {
            return Ok(());
        }

        self.images
            .delete_profile(ctx, &object_name_from_url(&user.image_url))
            .await?;
        self.users.update_image(ctx, uid, "").await?;
        Ok(())
    }
}

/// Storage object name for a profile image URL
///
/// The last path segment of an existing URL, so uploads overwrite the old
/// object, or a fresh UUID when the user has no image yet.
fn object_name_from_url(image_url: &str) -> String {
    let path = image_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && !image_url.is_empty() => name.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}
