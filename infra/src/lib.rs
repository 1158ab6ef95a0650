//! # Infrastructure Layer
//!
//! Concrete implementations of the capability traits defined in `acct_core`.
//!
//! ## Architecture
//!
//! - **Cache**: Redis client and the Redis-backed refresh token store
//! - **Database**: Postgres connection pool and user repository using SQLx
//! - **Storage**: filesystem-backed profile image repository
//! - **Memory**: in-process implementations of every repository, for local
//!   development and HTTP-level tests

pub mod cache;
pub mod database;
pub mod memory;
pub mod storage;

use acct_core::errors::{DomainError, StoreError};

pub use cache::{RedisClient, RedisTokenRepository};
pub use database::{DatabasePool, PgUserRepository};
pub use memory::{InMemoryImageRepository, InMemoryTokenRepository, InMemoryUserRepository};
pub use storage::LocalImageRepository;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation did not finish within the configured time
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        StoreError::unavailable(err.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
