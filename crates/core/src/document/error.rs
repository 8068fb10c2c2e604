//! Document error types.

use thiserror::Error;

use crate::project::ProjectError;
use crate::storage::StorageError;

/// Project document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// The record fields are invalid.
    #[error(transparent)]
    Validation(#[from] ProjectError),

    /// Storage operation failed or rejected the file.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl DocumentError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
