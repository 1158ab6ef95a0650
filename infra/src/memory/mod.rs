//! In-process repositories
//!
//! Same observable semantics as the networked backends, without the network.
//! Used for local development and the HTTP test suites.

pub mod image_repository;
pub mod token_repository;
pub mod user_repository;

pub use image_repository::InMemoryImageRepository;
pub use token_repository::InMemoryTokenRepository;
pub use user_repository::InMemoryUserRepository;
