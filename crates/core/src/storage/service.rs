//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::{StorageError, op_error};

/// Category of a stored document; the first segment of its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Project contract.
    Contract,
    /// Expense receipt.
    Receipt,
}

impl DocumentKind {
    /// Key prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Contract => "contracts",
            Self::Receipt => "receipts",
        }
    }
}

/// A document written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Storage key.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type recorded at upload.
    pub content_type: String,
}

/// Storage service for uploaded documents.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let StorageProvider::LocalFs { root } = provider;
        let root = root
            .to_str()
            .ok_or_else(|| StorageError::Configuration("invalid path".to_string()))?;

        Operator::new(services::Fs::default().root(root))
            .map(|builder| builder.finish())
            .map_err(|e| StorageError::Configuration(e.to_string()))
    }

    /// Checks size and MIME type against the configured limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is empty, too large or of a rejected type.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size == 0 {
            return Err(StorageError::EmptyFile);
        }
        if size > self.config.max_file_size {
            return Err(StorageError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }
        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::InvalidMimeType {
                mime_type: content_type.to_string(),
            });
        }
        Ok(())
    }

    /// Builds a collision-free key: `{kind}/{id}-{sanitized_filename}`.
    #[must_use]
    pub fn generate_key(kind: DocumentKind, id: Uuid, filename: &str) -> String {
        let sanitized = sanitize_filename(filename);
        let sanitized = if sanitized.is_empty() {
            "document".to_string()
        } else {
            sanitized
        };
        format!("{}/{id}-{sanitized}", kind.prefix())
    }

    /// Validates and writes a document under a fresh key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn store(
        &self,
        kind: DocumentKind,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredDocument, StorageError> {
        let size = u64::try_from(data.len()).unwrap_or(u64::MAX);
        self.validate_upload(content_type, size)?;

        let key = Self::generate_key(kind, Uuid::new_v4(), filename);
        self.operator
            .write(&key, data)
            .await
            .map_err(op_error(&key))?;

        Ok(StoredDocument {
            key,
            size,
            content_type: content_type.to_string(),
        })
    }

    /// Reads a document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing key and `InvalidKey` for traversal
    /// attempts.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        validate_key(key)?;
        let buffer = self.operator.read(key).await.map_err(op_error(key))?;
        Ok(buffer.to_bytes())
    }

    /// Deletes a document. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.operator.delete(key).await.map_err(op_error(key))
    }

    /// Check if a document exists.
    pub async fn exists(&self, key: &str) -> bool {
        if validate_key(key).is_err() {
            return false;
        }
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// MIME type for a stored key, from its extension.
#[must_use]
pub fn content_type_for_key(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Rejects empty keys, absolute keys and `..` segments.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment.is_empty() || segment == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
