//! In-memory profile image store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use acct_core::context::RequestContext;
use acct_core::domain::entities::image::ProfileImage;
use acct_core::errors::DomainError;
use acct_core::repositories::ImageRepository;

/// Images kept in a map of object name to content
#[derive(Debug, Clone)]
pub struct InMemoryImageRepository {
    objects: Arc<RwLock<HashMap<String, ProfileImage>>>,
    public_base_url: String,
}

impl Default for InMemoryImageRepository {
    fn default() -> Self {
        Self::new("http://localhost/images")
    }
}

impl InMemoryImageRepository {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn get(&self, object_name: &str) -> Option<ProfileImage> {
        self.objects.read().await.get(object_name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn update_profile(
        &self,
        ctx: &RequestContext,
        object_name: &str,
        image: &ProfileImage,
    ) -> Result<String, DomainError> {
        ctx.check()?;
        self.objects
            .write()
            .await
            .insert(object_name.to_string(), image.clone());
        Ok(format!("{}/{}", self.public_base_url, object_name))
    }

    async fn delete_profile(&self, ctx: &RequestContext, object_name: &str) -> Result<(), DomainError> {
        ctx.check()?;
        self.objects.write().await.remove(object_name);
        Ok(())
    }
}
