//! Profile image storage backends

pub mod local_image_repository;

pub use local_image_repository::LocalImageRepository;
