//! Mock implementation of ImageRepository for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::domain::entities::image::ProfileImage;
use crate::errors::DomainError;

use super::r#trait::ImageRepository;

pub const MOCK_IMAGE_BASE_URL: &str = "https://images.test/profile";

/// Mock image repository for testing
#[derive(Default)]
pub struct MockImageRepository {
    objects: Arc<RwLock<HashMap<String, ProfileImage>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
}

impl MockImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_with(&self, error: DomainError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn contains(&self, object_name: &str) -> bool {
        self.objects.read().await.contains_key(object_name)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    async fn injected(&self, ctx: &RequestContext) -> Result<(), DomainError> {
        ctx.check()?;
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageRepository for MockImageRepository {
    async fn update_profile(
        &self,
        ctx: &RequestContext,
        object_name: &str,
        image: &ProfileImage,
    ) -> Result<String, DomainError> {
        self.injected(ctx).await?;
        self.objects
            .write()
            .await
            .insert(object_name.to_string(), image.clone());
        Ok(format!("{}/{}", MOCK_IMAGE_BASE_URL, object_name))
    }

    async fn delete_profile(&self, ctx: &RequestContext, object_name: &str) -> Result<(), DomainError> {
        self.injected(ctx).await?;
        self.objects.write().await.remove(object_name);
        Ok(())
    }
}
