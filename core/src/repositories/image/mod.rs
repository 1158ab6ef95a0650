mod r#trait;

pub use r#trait::ImageRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockImageRepository;
