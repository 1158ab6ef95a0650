//! # Account Core
//!
//! Domain layer for the account service backend.
//! This crate contains the domain entities, the error taxonomy, the request
//! context used for cancellation, the repository capability traits, and the
//! two services built on top of them: the token issuer and the account service.

pub mod context;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use context::{Interrupted, RequestContext};
pub use domain::{
    IdTokenClaims, ProfileImage, RefreshToken, RefreshTokenClaims, TokenPair, User, UserDetails,
};
pub use errors::{DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{ImageRepository, TokenRepository, UserRepository};
pub use services::{AccountService, IdTokenValidator, SigningKeys, TokenService, TokenServiceConfig};
