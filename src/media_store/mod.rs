mod dto;
mod error;
mod gridfs_media_store;
mod media_store;

pub use dto::*;
pub use error::*;
pub use gridfs_media_store::*;
pub use media_store::*;
