//! Project document service implementation.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DocumentError;
use crate::project::BdExpenditureInput;
use crate::storage::{DocumentKind, StorageService};
use tracing::warn;

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-side filename.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File content.
    pub data: Bytes,
}

/// A stored BD-expenditure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BdExpenditure {
    /// Row id.
    pub id: i32,
    /// Owning project.
    pub project_id: String,
    /// Purpose of the spend.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Date incurred.
    pub spent_on: Option<NaiveDate>,
    /// Storage key of the receipt.
    pub receipt_key: String,
}

/// Persistence for document-bearing project records.
///
/// This trait is implemented by the db crate.
pub trait ProjectDocumentRepository: Send + Sync {
    /// Check if a project exists.
    fn project_exists(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<bool, DocumentError>> + Send;

    /// Insert a BD-expenditure row referencing a stored receipt.
    fn create_bd_expenditure(
        &self,
        project_id: &str,
        input: BdExpenditureInput,
        receipt_key: String,
    ) -> impl Future<Output = Result<BdExpenditure, DocumentError>> + Send;

    /// Point a project at a new contract document. Returns the previous key.
    fn replace_contract(
        &self,
        project_id: &str,
        contract_key: String,
    ) -> impl Future<Output = Result<Option<String>, DocumentError>> + Send;
}

/// Coordinates document storage with the rows that reference it.
pub struct ProjectDocumentService<R: ProjectDocumentRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: ProjectDocumentRepository> ProjectDocumentService<R> {
    /// Create a new document service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Record a BD expenditure with its mandatory receipt.
    ///
    /// The receipt is stored first; if the insert then fails the stored file
    /// is removed again.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fields are invalid
    /// - The project does not exist
    /// - The receipt is rejected or cannot be stored
    /// - The insert fails
    pub async fn record_bd_expenditure(
        &self,
        project_id: &str,
        input: BdExpenditureInput,
        receipt: UploadedFile,
    ) -> Result<BdExpenditure, DocumentError> {
        let input = input.validate()?;

        if !self.repo.project_exists(project_id).await? {
            return Err(DocumentError::ProjectNotFound(project_id.to_string()));
        }

        let stored = self
            .storage
            .store(
                DocumentKind::Receipt,
                &receipt.filename,
                &receipt.content_type,
                receipt.data,
            )
            .await?;

        match self
            .repo
            .create_bd_expenditure(project_id, input, stored.key.clone())
            .await
        {
            Ok(record) => Ok(record),
            Err(err) => {
                self.discard(&stored.key).await;
                Err(err)
            }
        }
    }

    /// Attach (or replace) a project's contract document. The previous
    /// contract file is deleted after the row is updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist, the file is rejected,
    /// or storage/database operations fail.
    pub async fn attach_contract(
        &self,
        project_id: &str,
        contract: UploadedFile,
    ) -> Result<String, DocumentError> {
        if !self.repo.project_exists(project_id).await? {
            return Err(DocumentError::ProjectNotFound(project_id.to_string()));
        }

        let stored = self
            .storage
            .store(
                DocumentKind::Contract,
                &contract.filename,
                &contract.content_type,
                contract.data,
            )
            .await?;

        let previous = match self
            .repo
            .replace_contract(project_id, stored.key.clone())
            .await
        {
            Ok(previous) => previous,
            Err(err) => {
                self.discard(&stored.key).await;
                return Err(err);
            }
        };

        if let Some(old_key) = previous {
            self.discard(&old_key).await;
        }

        Ok(stored.key)
    }

    /// Best-effort delete of a document no row points at.
    async fn discard(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(key = %key, error = %e, "Failed to delete unreferenced document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageProvider, StorageError};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory repository.
    #[derive(Default)]
    struct MockProjectRepository {
        projects: Mutex<HashMap<String, Option<String>>>,
        bd: Mutex<Vec<BdExpenditure>>,
        fail_inserts: bool,
        /// Replaced by a plain file when an insert fails.
        storage_root: Option<std::path::PathBuf>,
    }

    impl MockProjectRepository {
        fn with_project(id: &str) -> Self {
            let repo = Self::default();
            repo.projects.lock().unwrap().insert(id.to_string(), None);
            repo
        }
    }

    impl ProjectDocumentRepository for MockProjectRepository {
        async fn project_exists(&self, project_id: &str) -> Result<bool, DocumentError> {
            Ok(self.projects.lock().unwrap().contains_key(project_id))
        }

        async fn create_bd_expenditure(
            &self,
            project_id: &str,
            input: BdExpenditureInput,
            receipt_key: String,
        ) -> Result<BdExpenditure, DocumentError> {
            if self.fail_inserts {
                if let Some(root) = &self.storage_root {
                    std::fs::remove_dir_all(root).unwrap();
                    std::fs::write(root, b"not a directory").unwrap();
                }
                return Err(DocumentError::repository("insert failed"));
            }
            let mut rows = self.bd.lock().unwrap();
            let record = BdExpenditure {
                id: i32::try_from(rows.len()).unwrap() + 1,
                project_id: project_id.to_string(),
                description: input.description,
                amount: input.amount,
                spent_on: input.spent_on,
                receipt_key,
            };
            rows.push(record.clone());
            Ok(record)
        }

        async fn replace_contract(
            &self,
            project_id: &str,
            contract_key: String,
        ) -> Result<Option<String>, DocumentError> {
            let mut projects = self.projects.lock().unwrap();
            let slot = projects
                .get_mut(project_id)
                .ok_or_else(|| DocumentError::ProjectNotFound(project_id.to_string()))?;
            Ok(slot.replace(contract_key))
        }
    }

    fn storage_at(root: &std::path::Path) -> Arc<StorageService> {
        let config = StorageConfig::new(StorageProvider::local_fs(root));
        Arc::new(StorageService::from_config(config).unwrap())
    }

    fn temp_root() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("misboard-docs-{}", uuid::Uuid::new_v4()))
    }

    fn storage() -> Arc<StorageService> {
        storage_at(&temp_root())
    }

    fn receipt() -> UploadedFile {
        UploadedFile {
            filename: "taxi.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: Bytes::from_static(b"%PDF receipt"),
        }
    }

    fn bd_input() -> BdExpenditureInput {
        BdExpenditureInput {
            description: "Client dinner".to_string(),
            amount: dec!(2450.50),
            spent_on: None,
        }
    }

    #[tokio::test]
    async fn test_record_bd_expenditure() {
        let storage = storage();
        let repo = Arc::new(MockProjectRepository::with_project("PRJ-1"));
        let service = ProjectDocumentService::new(Arc::clone(&storage), Arc::clone(&repo));

        let record = service
            .record_bd_expenditure("PRJ-1", bd_input(), receipt())
            .await
            .expect("should record");

        assert_eq!(record.project_id, "PRJ-1");
        assert!(record.receipt_key.starts_with("receipts/"));
        assert!(storage.exists(&record.receipt_key).await);
    }

    #[tokio::test]
    async fn test_unknown_project_stores_nothing() {
        let service = ProjectDocumentService::new(storage(), Arc::new(MockProjectRepository::default()));
        let result = service.record_bd_expenditure("NOPE", bd_input(), receipt()).await;
        assert!(matches!(result, Err(DocumentError::ProjectNotFound(_))));
    }

    #[tokio::test]
    async fn test_rejected_receipt_type() {
        let service = ProjectDocumentService::new(
            storage(),
            Arc::new(MockProjectRepository::with_project("PRJ-1")),
        );
        let mut file = receipt();
        file.content_type = "application/x-msdownload".to_string();

        let result = service.record_bd_expenditure("PRJ-1", bd_input(), file).await;
        assert!(matches!(
            result,
            Err(DocumentError::Storage(StorageError::InvalidMimeType { .. }))
        ));
    }

    #[tokio::test]
    async fn test_failed_insert_removes_receipt() {
        let root = temp_root();
        let repo = MockProjectRepository {
            fail_inserts: true,
            ..MockProjectRepository::with_project("PRJ-1")
        };
        let service = ProjectDocumentService::new(storage_at(&root), Arc::new(repo));

        let result = service.record_bd_expenditure("PRJ-1", bd_input(), receipt()).await;
        assert!(matches!(result, Err(DocumentError::Repository(_))));

        let leftovers = std::fs::read_dir(root.join("receipts"))
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_failed_cleanup_keeps_insert_error() {
        let root = temp_root();
        let repo = MockProjectRepository {
            fail_inserts: true,
            storage_root: Some(root.clone()),
            ..MockProjectRepository::with_project("PRJ-1")
        };
        let service = ProjectDocumentService::new(storage_at(&root), Arc::new(repo));

        let result = service.record_bd_expenditure("PRJ-1", bd_input(), receipt()).await;

        match result {
            Err(DocumentError::Repository(message)) => assert_eq!(message, "insert failed"),
            other => panic!("unexpected result: {other:?}"),
        }
        std::fs::remove_file(&root).unwrap();
    }

    #[tokio::test]
    async fn test_replacing_contract_deletes_previous() {
        let storage = storage();
        let repo = Arc::new(MockProjectRepository::with_project("PRJ-1"));
        let service = ProjectDocumentService::new(Arc::clone(&storage), repo);

        let contract = |name: &str| UploadedFile {
            filename: name.to_string(),
            content_type: "application/pdf".to_string(),
            data: Bytes::from_static(b"%PDF contract"),
        };

        let first = service
            .attach_contract("PRJ-1", contract("v1.pdf"))
            .await
            .expect("should attach");
        let second = service
            .attach_contract("PRJ-1", contract("v2.pdf"))
            .await
            .expect("should attach");

        assert_ne!(first, second);
        assert!(!storage.exists(&first).await);
        assert!(storage.exists(&second).await);
    }

    #[tokio::test]
    async fn test_invalid_fields_checked_first() {
        let service = ProjectDocumentService::new(storage(), Arc::new(MockProjectRepository::default()));
        let mut input = bd_input();
        input.amount = dec!(-5);

        let result = service.record_bd_expenditure("PRJ-1", input, receipt()).await;
        assert!(matches!(result, Err(DocumentError::Validation(_))));
    }
}
