//! Domain-specific error types and error handling.
//!
//! [`DomainError`] is the closed, caller-visible taxonomy. Lower layers report
//! [`TokenError`] (claims codec) and [`StoreError`] (refresh token store), which
//! the services translate into a `DomainError` before returning.

mod types;

#[cfg(test)]
mod tests;

pub use types::{StoreError, TokenError};

use thiserror::Error;

use crate::context::Interrupted;

/// Message shown to callers in place of any internal error detail
pub const INTERNAL_ERROR_MESSAGE: &str = "an internal error occurred";

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Resource {resource} with value {value} already exists")]
    Conflict { resource: String, value: String },

    #[error("Resource {resource} with value {value} not found")]
    NotFound { resource: String, value: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Max payload size of {max_bytes} bytes exceeded")]
    PayloadTooLarge { max_bytes: usize },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Request was canceled")]
    Canceled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl DomainError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn conflict(resource: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
            value: value.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Stable machine-readable code, used as the `type` of the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Conflict { .. } => "CONFLICT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "BAD_REQUEST",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::Internal { .. } => "INTERNAL",
            Self::Canceled => "CANCELED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// HTTP status the transport layer answers with
    ///
    /// Canceled has no standard status; it is reported as 503 like a timeout.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::Conflict { .. } => 409,
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Internal { .. } => 500,
            Self::Canceled | Self::DeadlineExceeded | Self::ServiceUnavailable => 503,
        }
    }

    /// Message safe to return to an external caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthorized { message } | Self::Validation { message } => message.clone(),
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
            Self::Canceled | Self::DeadlineExceeded | Self::ServiceUnavailable => {
                "service unavailable or timed out".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<Interrupted> for DomainError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Canceled => Self::Canceled,
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
