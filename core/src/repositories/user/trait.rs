//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Lookups fail with `DomainError::NotFound`, writes that would duplicate an
/// email fail with `DomainError::Conflict`. Backend failures are
/// `DomainError::Internal`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, ctx: &RequestContext, uid: Uuid) -> Result<User, DomainError>;

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, DomainError>;

    /// Persist a new user and return the stored record
    async fn create(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError>;

    /// Overwrite the profile fields (name, email, website) of an existing user
    async fn update(&self, ctx: &RequestContext, user: &User) -> Result<User, DomainError>;

    /// Set the profile image URL, empty to clear it
    async fn update_image(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        image_url: &str,
    ) -> Result<User, DomainError>;
}
