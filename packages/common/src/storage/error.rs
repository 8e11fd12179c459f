use super::name::NameError;

/// Errors that can occur while storing or reading uploaded images.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No image is stored under the given locator.
    #[error("image not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
