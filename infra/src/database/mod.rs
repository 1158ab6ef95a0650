//! Database module - Postgres implementations using SQLx

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::PgUserRepository;
