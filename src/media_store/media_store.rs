use super::{Error, StoredMedia};
use axum::async_trait;

///
/// Durable storage for media payloads of image and audio capsules
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    ///
    /// Stores bytes under the key
    ///
    /// ### Returns
    /// Public URL under which the media can be downloaded
    ///
    async fn upload(&self, bytes: Vec<u8>, content_type: &str, key: &str)
        -> Result<String, Error>;

    async fn download(&self, key: &str) -> Result<Option<StoredMedia>, Error>;

    ///
    /// Removes media stored under the key. Missing media is not an error.
    ///
    async fn delete(&self, key: &str) -> Result<(), Error>;
}
