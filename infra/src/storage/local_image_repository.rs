//! Filesystem implementation of the ImageRepository trait.
//!
//! Objects are written to `{image_dir}/{object_name}` and served publicly
//! from `{public_base_url}/{object_name}`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use acct_core::context::RequestContext;
use acct_core::domain::entities::image::ProfileImage;
use acct_core::errors::DomainError;
use acct_core::repositories::ImageRepository;
use acct_shared::config::StorageConfig;

use crate::InfrastructureError;

/// Profile image store on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageRepository {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageRepository {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.image_dir, &config.public_base_url)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, object_name: &str) -> Result<PathBuf, DomainError> {
        let valid = !object_name.is_empty()
            && object_name != "."
            && object_name != ".."
            && !object_name.contains(['/', '\\']);
        if !valid {
            return Err(DomainError::validation(format!(
                "invalid image object name {:?}",
                object_name
            )));
        }
        Ok(self.root.join(object_name))
    }
}

#[async_trait]
impl ImageRepository for LocalImageRepository {
    async fn update_profile(
        &self,
        ctx: &RequestContext,
        object_name: &str,
        image: &ProfileImage,
    ) -> Result<String, DomainError> {
        let path = self.object_path(object_name)?;

        ctx.run(async {
            fs::create_dir_all(&self.root).await?;
            fs::write(&path, &image.bytes).await
        })
        .await?
        .map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write profile image");
            DomainError::from(InfrastructureError::Io(e))
        })?;

        tracing::debug!(object = object_name, bytes = image.len(), "Stored profile image");
        Ok(format!("{}/{}", self.public_base_url, object_name))
    }

    async fn delete_profile(&self, ctx: &RequestContext, object_name: &str) -> Result<(), DomainError> {
        let path = self.object_path(object_name)?;

        match ctx.run(fs::remove_file(&path)).await? {
            Ok(()) => Ok(()),
            // already gone is what the caller wants
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to delete profile image");
                Err(InfrastructureError::Io(e).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_replace_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalImageRepository::new(dir.path().join("images"), "https://cdn.test/img/");
        let ctx = RequestContext::new();

        let url = repo
            .update_profile(&ctx, "abc", &ProfileImage::new("image/png", vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.test/img/abc");

        repo.update_profile(&ctx, "abc", &ProfileImage::new("image/png", vec![9]))
            .await
            .unwrap();
        let stored = std::fs::read(repo.root().join("abc")).unwrap();
        assert_eq!(stored, vec![9]);

        repo.delete_profile(&ctx, "abc").await.unwrap();
        assert!(!repo.root().join("abc").exists());

        // deleting twice is fine
        repo.delete_profile(&ctx, "abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalImageRepository::new(dir.path(), "https://cdn.test");
        let ctx = RequestContext::new();
        let image = ProfileImage::new("image/png", vec![1]);

        for name in ["../escape", "..", "a/b", ""] {
            let result = repo.update_profile(&ctx, name, &image).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })), "{}", name);
        }
    }

    #[tokio::test]
    async fn test_canceled_context_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalImageRepository::new(dir.path(), "https://cdn.test");
        let ctx = RequestContext::new();
        ctx.cancel();

        let result = repo
            .update_profile(&ctx, "abc", &ProfileImage::new("image/png", vec![1]))
            .await;
        assert_eq!(result, Err(DomainError::Canceled));
        assert!(!dir.path().join("abc").exists());
    }
}
