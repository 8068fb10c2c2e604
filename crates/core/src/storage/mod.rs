//! Document storage using Apache OpenDAL.
//!
//! Contracts and receipts are stored as opaque objects under
//! `{kind}/{uuid}-{sanitized filename}` keys, so two uploads with the same
//! original filename never collide. Objects live on the local filesystem
//! under the configured root.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{DocumentKind, StorageService, StoredDocument, content_type_for_key};
