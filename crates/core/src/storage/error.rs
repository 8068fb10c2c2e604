//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File size exceeds maximum allowed.
    #[error("file size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Uploaded file has no content.
    #[error("file is empty")]
    EmptyFile,

    /// MIME type not allowed.
    #[error("MIME type '{mime_type}' is not allowed")]
    InvalidMimeType {
        /// The rejected MIME type.
        mime_type: String,
    },

    /// Object not found.
    #[error("document not found: {key}")]
    NotFound {
        /// Key that was not found.
        key: String,
    },

    /// Key is empty or escapes the storage root.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Provider could not be initialized.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// True when the request, not the backend, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge { .. }
                | Self::EmptyFile
                | Self::InvalidMimeType { .. }
                | Self::InvalidKey(_)
        )
    }

    fn from_opendal(err: &opendal::Error, key: &str) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: key.to_string(),
            },
            _ => Self::Operation(err.to_string()),
        }
    }
}

/// Attaches the key to an OpenDAL error.
pub(super) fn op_error(key: &str) -> impl FnOnce(opendal::Error) -> StorageError + '_ {
    move |err| StorageError::from_opendal(&err, key)
}
