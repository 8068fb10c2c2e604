//! Project documents: BD-expenditure receipts and project contracts.
//!
//! Files go to [`StorageService`](crate::storage::StorageService); the
//! database row that references them is written through
//! [`ProjectDocumentRepository`], implemented by the db crate.

mod error;
mod service;

pub use error::DocumentError;
pub use service::{BdExpenditure, ProjectDocumentRepository, ProjectDocumentService, UploadedFile};
