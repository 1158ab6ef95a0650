//! Cache module for the Redis-backed refresh token store

pub mod redis_client;
pub mod token_repository;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use token_repository::RedisTokenRepository;

// Re-export commonly used types
pub use acct_shared::config::CacheConfig;
