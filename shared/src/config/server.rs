//! Server configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,

    /// Base path all account routes are mounted under
    pub base_url: String,

    /// Per-request handler timeout in seconds
    pub handler_timeout: u64,

    /// Maximum accepted request body in bytes (profile image uploads)
    pub max_body_bytes: usize,

    /// Origins allowed by CORS (empty = any)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            base_url: String::from("/api/account"),
            handler_timeout: 5,
            max_body_bytes: 4 * 1024 * 1024,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            base_url: std::env::var("ACCOUNT_API_URL").unwrap_or(defaults.base_url),
            handler_timeout: std::env::var("HANDLER_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.handler_timeout),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            ..defaults
        }
    }

    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Handler timeout as a duration
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout)
    }
}
