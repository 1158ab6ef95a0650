//! Token service module for the identity/refresh token lifecycle
//!
//! This module handles:
//! - Claims encoding and decoding (RS256 identity tokens, HS256 refresh tokens)
//! - Signing key loading
//! - Issuing, rotating and revoking token pairs against the refresh token store

pub mod codec;
mod config;
mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use keys::SigningKeys;
pub use service::{IdTokenValidator, TokenService};
