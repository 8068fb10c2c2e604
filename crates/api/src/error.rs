//! API error envelope.
//!
//! Every failure leaves a handler as `{ "error": CODE, "message": text }`.
//! Domain and repository errors are first mapped onto [`AppError`], which
//! decides the status code. Server-side failures are logged with their
//! detail and answered with a generic message.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use misboard_core::bank_details::BankDetailsError;
use misboard_core::bill::IngestError;
use misboard_core::document::DocumentError;
use misboard_core::expenditure::ExpenditureError;
use misboard_core::project::ProjectError;
use misboard_core::quarter::QuarterParseError;
use misboard_core::sales::SalesError;
use misboard_core::storage::StorageError;
use misboard_db::repositories::{
    BankError, BillExpenditureError, ExpenditureRepoError, ProjectRepoError, SalesQuarterError,
};
use misboard_shared::AppError;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// The message sent to the client.
    fn public_message(&self) -> String {
        match &self.0 {
            AppError::Database(_) => "Database operation failed".to_string(),
            AppError::Storage(_) => "Storage operation failed".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            other => other.message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }

        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": self.0.error_code(),
            "message": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

// ============================================================================
// Extractor rejections
// ============================================================================

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => Self::validation(e.body_text()),
            other => Self(AppError::Internal(other.body_text())),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(format!("invalid multipart body: {}", err.body_text()))
    }
}

// ============================================================================
// Core errors
// ============================================================================

impl From<QuarterParseError> for ApiError {
    fn from(err: QuarterParseError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Spreadsheet(e) => Self(AppError::Storage(e.to_string())),
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<ExpenditureError> for ApiError {
    fn from(err: ExpenditureError) -> Self {
        match err {
            ExpenditureError::Spreadsheet(e) => Self(AppError::Storage(e.to_string())),
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<SalesError> for ApiError {
    fn from(err: SalesError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<BankDetailsError> for ApiError {
    fn from(err: BankDetailsError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { key } => Self(AppError::NotFound(format!("document {key}"))),
            e if e.is_client_error() => Self::validation(e.to_string()),
            e => Self(AppError::Storage(e.to_string())),
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::ProjectNotFound(id) => Self(AppError::NotFound(format!("project {id}"))),
            DocumentError::Validation(e) => e.into(),
            DocumentError::Storage(e) => e.into(),
            DocumentError::Repository(msg) => Self(AppError::Database(msg)),
        }
    }
}

// ============================================================================
// Repository errors
// ============================================================================

impl From<BillExpenditureError> for ApiError {
    fn from(err: BillExpenditureError) -> Self {
        match err {
            BillExpenditureError::NotFound(id) => {
                Self(AppError::NotFound(format!("transaction {id}")))
            }
            BillExpenditureError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<ExpenditureRepoError> for ApiError {
    fn from(err: ExpenditureRepoError) -> Self {
        match err {
            ExpenditureRepoError::NotFound(id) => {
                Self(AppError::NotFound(format!("expenditure {id}")))
            }
            ExpenditureRepoError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<SalesQuarterError> for ApiError {
    fn from(err: SalesQuarterError) -> Self {
        match err {
            SalesQuarterError::Duplicate(_) => Self(AppError::Conflict(err.to_string())),
            SalesQuarterError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<BankError> for ApiError {
    fn from(err: BankError) -> Self {
        match err {
            BankError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<ProjectRepoError> for ApiError {
    fn from(err: ProjectRepoError) -> Self {
        match err {
            ProjectRepoError::NotFound(id) => Self(AppError::NotFound(format!("project {id}"))),
            ProjectRepoError::Duplicate(_) => Self(AppError::Conflict(err.to_string())),
            ProjectRepoError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}
