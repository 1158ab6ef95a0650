//! Profile image storage configuration

use serde::{Deserialize, Serialize};

/// Where profile images are written and how they are addressed publicly
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory objects are written to
    pub image_dir: String,

    /// Public URL prefix; the object name is appended to it
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: String::from("data/profile-images"),
            public_base_url: String::from("http://localhost:8080/images"),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            image_dir: std::env::var("IMAGE_STORAGE_DIR").unwrap_or(defaults.image_dir),
            public_base_url: std::env::var("IMAGE_PUBLIC_BASE_URL")
                .unwrap_or(defaults.public_base_url),
        }
    }
}
