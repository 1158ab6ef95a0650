//! Token signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// JWT configuration for identity and refresh tokens
///
/// Identity tokens are signed with an RSA key pair (RS256) so that any service
/// holding only the public key can validate them. Refresh tokens are signed
/// with a shared secret (HS256) and are only ever validated by this service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Path to the PEM-encoded RSA private key used to sign identity tokens
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key used to validate identity tokens
    pub public_key_path: String,

    /// Shared secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Identity token lifetime in seconds
    pub id_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/rsa_private.pem"),
            public_key_path: String::from("keys/rsa_public.pem"),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            id_token_expiry: 900,          // 15 minutes
            refresh_token_expiry: 259_200, // 3 days
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            private_key_path: std::env::var("PRIVATE_KEY_FILE")
                .unwrap_or(defaults.private_key_path),
            public_key_path: std::env::var("PUBLIC_KEY_FILE").unwrap_or(defaults.public_key_path),
            refresh_secret: std::env::var("REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            id_token_expiry: std::env::var("ID_TOKEN_EXP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.id_token_expiry),
            refresh_token_expiry: std::env::var("REFRESH_TOKEN_EXP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
        }
    }

    /// Set identity token expiry in minutes
    pub fn with_id_expiry_minutes(mut self, minutes: i64) -> Self {
        self.id_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Check if using the development refresh secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_builders() {
        let config = JwtConfig::default()
            .with_id_expiry_minutes(5)
            .with_refresh_expiry_days(1);
        assert_eq!(config.id_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 86_400);
        assert!(config.is_using_default_secret());
    }
}
