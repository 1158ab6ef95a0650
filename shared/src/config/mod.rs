//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Signing keys and token lifetimes
//! - `cache` - Redis configuration for refresh token liveness
//! - `database` - Postgres connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server, request timeout and body limits
//! - `storage` - Profile image storage

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Prefix for layered environment overrides, e.g. `ACCOUNT__SERVER__PORT=9000`
const ENV_PREFIX: &str = "ACCOUNT";

/// Errors raised while assembling the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Refresh token store configuration
    pub cache: CacheConfig,

    /// Token signing configuration
    pub auth: JwtConfig,

    /// Profile image storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables using the flat names
    /// the service has always been deployed with (`REFRESH_SECRET`, `ID_TOKEN_EXP`, ...)
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load layered configuration
    ///
    /// Layers, lowest precedence first:
    /// 1. `.env` file (through `dotenvy`) and the flat variables of [`AppConfig::from_env`]
    /// 2. `config/{environment}.toml`, if present
    /// 3. `ACCOUNT__SECTION__FIELD` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base = Self::from_env();
        let file = format!("config/{}", base.environment.config_file());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let overrides: serde_json::Value = settings.try_deserialize()?;
        let config = base.merge(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay a partial JSON document onto this configuration
    fn merge(self, overrides: serde_json::Value) -> Result<Self, ConfigError> {
        let mut current = serde_json::to_value(&self)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        merge_values(&mut current, overrides);
        serde_json::from_value(current).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.id_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "auth.id_token_expiry must be positive".to_string(),
            ));
        }
        if self.auth.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "auth.refresh_token_expiry must be positive".to_string(),
            ));
        }
        if self.auth.refresh_secret.is_empty() {
            return Err(ConfigError::Invalid("auth.refresh_secret is empty".to_string()));
        }
        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "the development refresh secret cannot be used in production".to_string(),
            ));
        }
        if self.server.handler_timeout == 0 {
            return Err(ConfigError::Invalid(
                "server.handler_timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

fn merge_values(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}
