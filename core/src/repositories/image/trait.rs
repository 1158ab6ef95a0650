//! Profile image storage interface.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::domain::entities::image::ProfileImage;
use crate::errors::DomainError;

/// Object storage for profile images
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Store `image` under `object_name`, replacing any previous object,
    /// and return its public URL
    async fn update_profile(
        &self,
        ctx: &RequestContext,
        object_name: &str,
        image: &ProfileImage,
    ) -> Result<String, DomainError>;

    async fn delete_profile(&self, ctx: &RequestContext, object_name: &str) -> Result<(), DomainError>;
}
