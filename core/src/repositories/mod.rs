//! Capability traits for the collaborators the services depend on.

pub mod image;
pub mod token;
pub mod user;

pub use image::ImageRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use image::MockImageRepository;
#[cfg(test)]
pub use token::{MockTokenRepository, StoreOp};
#[cfg(test)]
pub use user::MockUserRepository;
