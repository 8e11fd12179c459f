use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_LIMIT: usize = 10;

/// Offset pagination over an already sorted list.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of entries to skip from the start of the list.
    #[param(example = 0)]
    pub skip: Option<usize>,
    /// Maximum number of entries to return (default 10).
    #[param(example = 10)]
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Select the contiguous `[skip, skip + limit)` window of `items`.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        items.into_iter().skip(skip).take(limit).collect()
    }
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}
