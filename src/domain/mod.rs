pub mod errors;
pub mod ids;
pub mod repositories;
pub mod thumbnails;
pub mod videos;

pub use errors::RepositoryError;
