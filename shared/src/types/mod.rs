//! Type definitions shared across crates
//!
//! - `response` - API error envelope and health check payloads

pub mod response;

pub use response::{ErrorBody, ErrorResponse, HealthResponse, HealthStatus};
