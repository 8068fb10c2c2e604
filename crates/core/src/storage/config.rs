//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Local filesystem.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum document size in bytes.
    pub max_file_size: u64,
    /// Accepted MIME types.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Config with default limits.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Contracts, receipts, invoices and scans.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        [
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "image/png",
            "image/jpeg",
            "image/webp",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Check if a MIME type is allowed. Parameters such as `; charset=` are ignored.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        self.allowed_mime_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        assert_eq!(StorageProvider::local_fs("./uploads").name(), "local");
    }

    #[test]
    fn test_provider_from_tagged_json() {
        let provider: StorageProvider =
            serde_json::from_str(r#"{"type": "local_fs", "root": "/var/misboard"}"#)
                .expect("should deserialize");
        assert!(matches!(provider, StorageProvider::LocalFs { .. }));
    }

    #[test]
    fn test_mime_type_validation() {
        let config = StorageConfig::new(StorageProvider::local_fs("./uploads"));
        assert!(config.is_mime_type_allowed("application/pdf"));
        assert!(config.is_mime_type_allowed("IMAGE/PNG"));
        assert!(config.is_mime_type_allowed("application/pdf; name=x.pdf"));
        assert!(!config.is_mime_type_allowed("application/x-executable"));
        assert!(!config.is_mime_type_allowed("text/html"));
    }
}
