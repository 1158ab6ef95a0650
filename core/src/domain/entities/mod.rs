//! Domain entities representing core business objects.

pub mod image;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use image::{ProfileImage, ALLOWED_IMAGE_TYPES};
pub use token::{
    IdTokenClaims, RefreshToken, RefreshTokenClaims, TokenPair,
    DEFAULT_ID_TOKEN_EXPIRY_SECONDS, DEFAULT_REFRESH_TOKEN_EXPIRY_SECONDS,
};
pub use user::{User, UserDetails};
