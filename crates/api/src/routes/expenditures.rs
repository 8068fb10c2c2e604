//! Expenditure routes: grouped listing, single insert, bulk import,
//! spreadsheet export, item update and category delete.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use misboard_core::expenditure::{
    CategoryGroup, ExpenditureRow, ExpenditureTotals, ImportCategory, NewExpenditure, RawAmount,
    UpdatedItem, export_workbook, flatten_import, group_by_category, import_workbook, totals,
};
use misboard_core::quarter::{QuarterFilter, QuarterTag};
use misboard_core::spreadsheet::XLSX_CONTENT_TYPE;
use misboard_db::repositories::ExpenditureRepository;
use misboard_shared::AppError;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, MultipartForm};

/// Creates the expenditure routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expenditures",
            get(list_expenditures)
                .post(create_expenditure)
                .put(update_expenditure),
        )
        .route(
            "/expenditures/import",
            post(import_expenditures).delete(delete_import_category),
        )
        .route("/expenditures/import/file", post(import_expenditure_file))
        .route(
            "/expenditures/export",
            get(export_expenditures).delete(delete_export_category),
        )
        .route("/expenditures/{category}", delete(delete_category))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// `?quarter=` filter.
#[derive(Debug, Deserialize)]
pub struct QuarterQuery {
    /// Quarter label, `All Quarters`, or absent.
    pub quarter: Option<String>,
}

/// Grouped listing.
#[derive(Debug, Serialize)]
pub struct ExpenditureListResponse {
    /// Applied filter label.
    pub quarter: &'static str,
    /// Category groups in first-seen order.
    pub details: Vec<CategoryGroup>,
    /// Per-category and grand totals.
    pub totals: ExpenditureTotals,
}

/// Single-insert body.
#[derive(Debug, Deserialize)]
pub struct CreateExpenditureRequest {
    /// Category.
    pub category: String,
    /// Item name.
    #[serde(alias = "name")]
    pub item_name: String,
    /// Amount, number or currency text.
    pub amount: RawAmount,
    /// Quarter label; absent means all quarters.
    #[serde(default)]
    pub quarter: Option<String>,
}

/// Update body: `{ id, updatedItem: { name, amount, quarter } }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenditureRequest {
    /// Row id.
    pub id: i32,
    /// Replacement values.
    pub updated_item: UpdatedItem,
}

/// Generic message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable summary.
    pub message: String,
}

/// Import result.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Human-readable summary.
    pub message: String,
    /// Rows persisted.
    pub imported: usize,
}

/// Single-insert result.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Human-readable summary.
    pub message: String,
    /// The stored row.
    pub expenditure: ExpenditureRow,
}

/// Category delete result.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Human-readable summary.
    pub message: String,
    /// Rows removed.
    pub deleted: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn load_groups(
    state: &AppState,
    filter: QuarterFilter,
) -> Result<Vec<CategoryGroup>, ApiError> {
    let repo = ExpenditureRepository::new(&state.db);
    let rows = repo.list(filter).await?;
    Ok(group_by_category(&rows))
}

/// GET `/expenditures?quarter=Q`
async fn list_expenditures(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<QuarterQuery>,
) -> Result<Json<ExpenditureListResponse>, ApiError> {
    let filter = QuarterFilter::from_query(query.quarter.as_deref())?;
    let details = load_groups(&state, filter).await?;
    let totals = totals(&details);

    Ok(Json(ExpenditureListResponse {
        quarter: filter.label(),
        details,
        totals,
    }))
}

/// POST `/expenditures`
async fn create_expenditure(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateExpenditureRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let quarter = QuarterTag::parse_optional(payload.quarter.as_deref())?;
    let row = NewExpenditure::new(
        &payload.category,
        &payload.item_name,
        payload.amount.to_decimal(),
        quarter,
    )?;

    let repo = ExpenditureRepository::new(&state.db);
    let expenditure = repo.create(&row).await?;

    info!(id = expenditure.id, category = %expenditure.category, "Expenditure created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Expenditure added successfully".to_string(),
            expenditure,
        }),
    ))
}

async fn store_import(
    state: &AppState,
    rows: &[NewExpenditure],
) -> Result<Json<ImportResponse>, ApiError> {
    let repo = ExpenditureRepository::new(&state.db);
    let imported = repo.import_rows(rows).await?;

    info!(imported, "Expenditures imported");

    Ok(Json(ImportResponse {
        message: format!("Successfully imported {imported} expenditure items"),
        imported,
    }))
}

/// POST `/expenditures/import`
/// Flatten `[{category, items[]}]` and insert every item in one transaction.
async fn import_expenditures(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Vec<ImportCategory>>,
) -> Result<Json<ImportResponse>, ApiError> {
    let rows = flatten_import(&payload)?;
    store_import(&state, &rows).await
}

/// POST `/expenditures/import/file`
/// Re-import a workbook in the export layout.
async fn import_expenditure_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_single_file("file")
        .ok_or_else(|| ApiError::validation("No file uploaded"))?;

    let rows = import_workbook(&file.data)?;
    store_import(&state, &rows).await
}

/// GET `/expenditures/export?quarter=Q`
async fn export_expenditures(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<QuarterQuery>,
) -> Result<Response, ApiError> {
    let filter = QuarterFilter::from_query(query.quarter.as_deref())?;
    let groups = load_groups(&state, filter).await?;
    let file = export_workbook(&groups, filter)?;

    info!(quarter = filter.label(), categories = groups.len(), "Expenditures exported");

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
            .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

/// PUT `/expenditures`
async fn update_expenditure(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateExpenditureRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let changes = payload.updated_item.validate()?;

    let repo = ExpenditureRepository::new(&state.db);
    repo.update_item(payload.id, changes).await?;

    info!(id = payload.id, "Expenditure updated");

    Ok(Json(MessageResponse {
        message: "Expenditure updated successfully".to_string(),
    }))
}

/// DELETE `/expenditures/{category}`
/// Remove every item of a category. Unknown categories succeed.
async fn delete_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    remove_category(&state, &category).await
}

/// DELETE `/expenditures/export`; the static route shadows the category path.
async fn delete_export_category(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    remove_category(&state, "export").await
}

/// DELETE `/expenditures/import`; the static route shadows the category path.
async fn delete_import_category(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    remove_category(&state, "import").await
}

async fn remove_category(state: &AppState, category: &str) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = ExpenditureRepository::new(&state.db);
    let deleted = repo.delete_category(category).await?;

    info!(category = %category, deleted, "Expenditure category deleted");

    Ok(Json(DeleteResponse {
        message: format!("Category '{category}' deleted successfully"),
        deleted,
    }))
}

#[cfg(test)]
#[path = "expenditures_tests.rs"]
mod tests;
