mod r#trait;

pub use r#trait::TokenRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::{MockTokenRepository, StoreOp};
