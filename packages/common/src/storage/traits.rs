use async_trait::async_trait;

use super::error::StorageError;

/// Destination for uploaded image bytes.
///
/// Images are addressed by the name they were uploaded under. Saving a name
/// that already exists replaces the previous content.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `data` under `name` and return the locator to persist as the image URL.
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, StorageError>;

    /// Read back the bytes behind a locator previously returned by [`ImageStore::save`].
    async fn load(&self, locator: &str) -> Result<Vec<u8>, StorageError>;
}
