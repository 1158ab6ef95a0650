//! # Account Shared
//!
//! Configuration and API envelope types shared by the core, infrastructure
//! and API crates of the account service.

pub mod config;
pub mod types;

pub use config::{AppConfig, ConfigError};
pub use types::response::{ErrorBody, ErrorResponse, HealthResponse, HealthStatus};
