//! Bank statement ("bill expenditure") routes.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use misboard_core::bank_details::BankDetails;
use misboard_core::bill::ingest_workbook;
use misboard_db::repositories::{BillExpenditureRepository, StoredTransaction};

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, MultipartForm};

/// Creates the bill expenditure routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bill-expenditures", get(list_transactions))
        .route("/bill-expenditures/import", post(import_statement))
        .route("/bill-expenditures/{id}/bank-details", put(update_bank_details))
}

/// Import result.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Human-readable summary.
    pub message: String,
    /// Rows persisted.
    pub imported: usize,
    /// Rows dropped during validation.
    pub skipped: usize,
}

/// Bank-detail update result.
#[derive(Debug, Serialize)]
pub struct BankDetailsResponse {
    /// Human-readable summary.
    pub message: String,
    /// The updated line.
    pub transaction: StoredTransaction,
}

/// POST `/bill-expenditures/import`
/// Ingest a statement workbook and store every valid line in one transaction.
async fn import_statement(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_single_file("file")
        .ok_or_else(|| ApiError::validation("No file uploaded"))?;

    let batch = ingest_workbook(&file.data, Utc::now().timestamp_millis()).inspect_err(|e| {
        warn!(filename = %file.filename, error = %e, "Statement rejected");
    })?;

    for issue in &batch.issues {
        if issue.kind.drops_row() {
            warn!(row = issue.row, reason = %issue.kind, "Skipped statement row");
        } else {
            warn!(row = issue.row, reason = %issue.kind, "Statement row imported with warning");
        }
    }

    let repo = BillExpenditureRepository::new(&state.db);
    let imported = repo.import_batch(&batch.records).await?;
    let skipped = batch.skipped();

    info!(
        filename = %file.filename,
        imported,
        skipped,
        "Bank statement imported"
    );

    Ok(Json(ImportResponse {
        message: format!("Successfully imported {imported} transactions"),
        imported,
        skipped,
    }))
}

/// GET `/bill-expenditures`
async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredTransaction>>, ApiError> {
    let repo = BillExpenditureRepository::new(&state.db);
    Ok(Json(repo.list_all().await?))
}

/// PUT `/bill-expenditures/{id}/bank-details`
/// Replace the bank-detail annotation of one line.
async fn update_bank_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(details): ApiJson<BankDetails>,
) -> Result<Json<BankDetailsResponse>, ApiError> {
    let details = details.validate()?;

    let repo = BillExpenditureRepository::new(&state.db);
    let transaction = repo.update_bank_details(id, &details).await?;

    info!(id, "Bank details updated");

    Ok(Json(BankDetailsResponse {
        message: "Bank details updated successfully".to_string(),
        transaction,
    }))
}
