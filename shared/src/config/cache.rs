//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the refresh token store
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubled per attempt)
    pub retry_delay_ms: u64,

    /// Keys requested per SCAN batch when revoking all of a user's tokens
    pub scan_batch_size: usize,

    /// Optional prefix applied to every key
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            max_retries: 3,
            retry_delay_ms: 100,
            scan_batch_size: 100,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            scan_batch_size: std::env::var("REDIS_SCAN_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scan_batch_size),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").ok(),
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("u:t"), "u:t");

        let config = config.with_prefix("refresh");
        assert_eq!(config.make_key("u:t"), "refresh:u:t");
    }
}
