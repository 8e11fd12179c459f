use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::name::check_image_name;
use super::traits::ImageStore;

/// Filesystem-backed image store.
///
/// Images are written flat into `base_path` under their upload name, and the
/// returned locator is `{base_path}/{name}`.
pub struct FilesystemImageStore {
    base_path: PathBuf,
}

impl FilesystemImageStore {
    /// Create a new filesystem image store, creating `base_path` if absent.
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn image_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, StorageError> {
        check_image_name(name)?;

        // The directory may have been removed since startup.
        fs::create_dir_all(&self.base_path).await?;

        let path = self.image_path(name);
        fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), size = data.len(), "Saved image");
        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, locator: &str) -> Result<Vec<u8>, StorageError> {
        let path = Path::new(locator);
        if path.parent() != Some(self.base_path.as_path()) {
            return Err(StorageError::NotFound(locator.to_string()));
        }

        match fs::read(path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(locator.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
