//! Account service: credentials, profile details and profile images

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use service::AccountService;
