//! Error types reported below the service layer

use thiserror::Error;

use crate::context::Interrupted;

/// Claims codec failures
///
/// Callers collapse every decode failure into one unauthorized condition;
/// the variants only matter for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token: {message}")]
    Malformed { message: String },

    #[error("Failed to load signing key: {message}")]
    KeyLoad { message: String },
}

impl TokenError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed { message: message.into() }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            // Asymmetric/symmetric mix-ups are a signature problem from the caller's view
            ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            _ => Self::malformed(err.to_string()),
        }
    }
}

/// Refresh token store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Refresh token store unavailable: {message}")]
    Unavailable { message: String },

    /// The key was not live when it was deleted
    #[error("Refresh token {token_id} for user {uid} not found")]
    NotFound { uid: String, token_id: String },

    #[error("Store operation canceled")]
    Canceled,

    #[error("Store operation deadline exceeded")]
    DeadlineExceeded,
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }
}

impl From<Interrupted> for StoreError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Canceled => Self::Canceled,
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}
