use async_trait::async_trait;
use dashmap::DashMap;

use super::error::StorageError;
use super::name::check_image_name;
use super::traits::ImageStore;

const LOCATOR_PREFIX: &str = "memory://";

/// In-memory image store with deterministic `memory://{name}` locators.
#[derive(Default)]
pub struct MemoryImageStore {
    images: DashMap<String, Vec<u8>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct names currently stored.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn save(&self, name: &str, data: &[u8]) -> Result<String, StorageError> {
        check_image_name(name)?;
        self.images.insert(name.to_string(), data.to_vec());
        Ok(format!("{LOCATOR_PREFIX}{name}"))
    }

    async fn load(&self, locator: &str) -> Result<Vec<u8>, StorageError> {
        locator
            .strip_prefix(LOCATOR_PREFIX)
            .and_then(|name| self.images.get(name))
            .map(|data| data.value().clone())
            .ok_or_else(|| StorageError::NotFound(locator.to_string()))
    }
}
