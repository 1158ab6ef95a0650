//! Business services containing domain logic and use cases.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use token::{IdTokenValidator, SigningKeys, TokenService, TokenServiceConfig};
