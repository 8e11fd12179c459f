//! Single-entity persistence for blogs and their images.
//!
//! Functions return `Ok(None)` for a missing entity; errors are reserved for
//! conflicts and database failures.

pub mod blog;
pub mod image;

use sea_orm::{DbErr, SqlErr};

/// Message used when a write trips a constraint other than title uniqueness.
pub const CONSTRAINT_ERROR: &str = "Database constraint error";

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Uniqueness or constraint violation.
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Translate a constraint violation raised by a write into `Conflict`.
///
/// Unique violations report `unique_msg`; foreign-key violations report
/// [`CONSTRAINT_ERROR`]. Any other error passes through unchanged.
fn constraint_error(err: DbErr, unique_msg: &str) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint caught on write: {detail}");
            RepositoryError::Conflict(unique_msg.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!("Foreign key constraint caught on write: {detail}");
            RepositoryError::Conflict(CONSTRAINT_ERROR.to_string())
        }
        _ => RepositoryError::Db(err),
    }
}
