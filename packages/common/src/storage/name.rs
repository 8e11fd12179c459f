/// Longest name most filesystems accept for a single directory entry, in bytes.
pub const MAX_NAME_BYTES: usize = 255;

/// Why an upload name cannot be used as an image file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Image name cannot be empty")]
    Empty,
    #[error("Image name must not start or end with whitespace")]
    SurroundingWhitespace,
    #[error("Image name must not contain directories or '..'")]
    PathComponent,
    #[error("Image name must not start with '.'")]
    Hidden,
    #[error("Image name must not contain control characters")]
    ControlCharacter,
    #[error("Image name must be at most {MAX_NAME_BYTES} bytes")]
    TooLong,
}

/// Check that `name` can be stored as-is, directly inside the image directory.
///
/// Names are never rewritten: anything that would need changing is rejected.
pub fn check_image_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.trim() != name {
        return Err(NameError::SurroundingWhitespace);
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(NameError::TooLong);
    }
    if name.chars().any(char::is_control) {
        return Err(NameError::ControlCharacter);
    }
    if name.contains(['/', '\\']) || name == ".." {
        return Err(NameError::PathComponent);
    }
    if name.starts_with('.') {
        return Err(NameError::Hidden);
    }
    Ok(())
}
