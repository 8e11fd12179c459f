mod error;
mod name;
mod traits;

pub mod filesystem;
pub mod memory;

pub use error::StorageError;
pub use name::{MAX_NAME_BYTES, NameError, check_image_name};
pub use traits::ImageStore;
