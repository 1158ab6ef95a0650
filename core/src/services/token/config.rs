//! Configuration for the token service

use acct_shared::config::JwtConfig;

use crate::domain::entities::token::{
    DEFAULT_ID_TOKEN_EXPIRY_SECONDS, DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS,
};

/// Token lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Identity token lifetime in seconds
    pub id_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            id_token_expiry_seconds: DEFAULT_ID_TOKEN_EXPIRY_SECONDS,
            refresh_token_expiry_seconds: DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            id_token_expiry_seconds: config.id_token_expiry,
            refresh_token_expiry_seconds: config.refresh_token_expiry,
        }
    }
}
