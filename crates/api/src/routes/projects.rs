//! Project routes: project records, CAPX/OPX line items, BD expenditures
//! with receipts, and the contract document.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Serialize;
use tracing::info;

use misboard_core::dates::parse_value_date;
use misboard_core::document::{BdExpenditure, ProjectDocumentService};
use misboard_core::money::try_parse_currency;
use misboard_core::project::{
    BdExpenditureInput, LineItemInput, LineKind, NewProject, ProjectDetails,
};
use misboard_db::entities::{project_line_items, projects};
use misboard_db::repositories::ProjectRepository;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, MultipartForm};

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project).put(update_project))
        .route("/projects/{id}/capx", get(list_capx).post(create_capx))
        .route("/projects/{id}/opx", get(list_opx).post(create_opx))
        .route(
            "/projects/{id}/bd-expenditures",
            get(list_bd_expenditures).post(create_bd_expenditure),
        )
        .route("/projects/{id}/contract", put(attach_contract).post(attach_contract))
}

// ============================================================================
// Response Types
// ============================================================================

/// Project write result.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Human-readable summary.
    pub message: String,
    /// The stored project.
    pub project: projects::Model,
}

/// Line item write result.
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    /// Human-readable summary.
    pub message: String,
    /// The stored line item.
    pub item: project_line_items::Model,
}

/// BD expenditure write result.
#[derive(Debug, Serialize)]
pub struct BdExpenditureResponse {
    /// Human-readable summary.
    pub message: String,
    /// The stored record, including its receipt key.
    pub expenditure: BdExpenditure,
}

/// Contract upload result.
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    /// Human-readable summary.
    pub message: String,
    /// Storage key of the new contract.
    pub contract_key: String,
}

fn repository(state: &AppState) -> ProjectRepository<'_> {
    ProjectRepository::new(&state.db)
}

fn document_service(state: &AppState) -> ProjectDocumentService<ProjectRepository<'_>> {
    ProjectDocumentService::new(state.storage.clone(), Arc::new(repository(state)))
}

// ============================================================================
// Projects
// ============================================================================

/// GET `/projects`
async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<projects::Model>>, ApiError> {
    Ok(Json(repository(&state).list_all().await?))
}

/// POST `/projects`
async fn create_project(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProject>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = payload.validate()?;
    let project = repository(&state).create(project).await?;

    info!(project_id = %project.id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: "Project created successfully".to_string(),
            project,
        }),
    ))
}

/// GET `/projects/{id}`
async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<projects::Model>, ApiError> {
    Ok(Json(repository(&state).get(&id).await?))
}

/// PUT `/projects/{id}`
async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<ProjectDetails>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let details = payload.validate()?;
    let project = repository(&state).update(&id, details).await?;

    info!(project_id = %project.id, "Project updated");

    Ok(Json(ProjectResponse {
        message: "Project updated successfully".to_string(),
        project,
    }))
}

// ============================================================================
// CAPX / OPX
// ============================================================================

async fn list_line_items(
    state: &AppState,
    id: &str,
    kind: LineKind,
) -> Result<Json<Vec<project_line_items::Model>>, ApiError> {
    Ok(Json(repository(state).list_line_items(id, kind).await?))
}

async fn add_line_item(
    state: &AppState,
    id: &str,
    kind: LineKind,
    input: LineItemInput,
) -> Result<(StatusCode, Json<LineItemResponse>), ApiError> {
    let input = input.validate()?;
    let item = repository(state).add_line_item(id, kind, input).await?;

    info!(project_id = %id, kind = kind.as_str(), item_id = item.id, "Line item added");

    Ok((
        StatusCode::CREATED,
        Json(LineItemResponse {
            message: format!("{} item added", kind.as_str().to_ascii_uppercase()),
            item,
        }),
    ))
}

/// GET `/projects/{id}/capx`
async fn list_capx(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Vec<project_line_items::Model>>, ApiError> {
    list_line_items(&state, &id, LineKind::Capx).await
}

/// POST `/projects/{id}/capx`
async fn create_capx(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<LineItemInput>,
) -> Result<(StatusCode, Json<LineItemResponse>), ApiError> {
    add_line_item(&state, &id, LineKind::Capx, payload).await
}

/// GET `/projects/{id}/opx`
async fn list_opx(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Vec<project_line_items::Model>>, ApiError> {
    list_line_items(&state, &id, LineKind::Opx).await
}

/// POST `/projects/{id}/opx`
async fn create_opx(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(payload): ApiJson<LineItemInput>,
) -> Result<(StatusCode, Json<LineItemResponse>), ApiError> {
    add_line_item(&state, &id, LineKind::Opx, payload).await
}

// ============================================================================
// BD expenditures and contract
// ============================================================================

/// GET `/projects/{id}/bd-expenditures`
async fn list_bd_expenditures(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Vec<BdExpenditure>>, ApiError> {
    Ok(Json(repository(&state).list_bd_expenditures(&id).await?))
}

/// Reads the text fields of a BD-expenditure form.
fn bd_input(form: &MultipartForm) -> Result<BdExpenditureInput, ApiError> {
    let amount = match form.text("amount") {
        Some(raw) => try_parse_currency(raw)
            .ok_or_else(|| ApiError::validation(format!("invalid amount '{raw}'")))?,
        None => return Err(ApiError::validation("amount is required")),
    };
    let spent_on = match form.text("spent_on") {
        Some(raw) => Some(
            parse_value_date(raw)
                .ok_or_else(|| ApiError::validation(format!("invalid date '{raw}'")))?,
        ),
        None => None,
    };

    Ok(BdExpenditureInput {
        description: form.text("description").unwrap_or_default().to_string(),
        amount,
        spent_on,
    })
}

/// POST `/projects/{id}/bd-expenditures`
/// Multipart: `description`, `amount`, optional `spent_on`, and a mandatory
/// `receipt` file.
async fn create_bd_expenditure(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<BdExpenditureResponse>), ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = bd_input(&form)?;
    let receipt = form
        .take_file("receipt")
        .ok_or_else(|| ApiError::validation("receipt file is required"))?;

    let expenditure = document_service(&state)
        .record_bd_expenditure(&id, input, receipt)
        .await?;

    info!(
        project_id = %id,
        expenditure_id = expenditure.id,
        receipt = %expenditure.receipt_key,
        "BD expenditure recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(BdExpenditureResponse {
            message: "BD expenditure recorded".to_string(),
            expenditure,
        }),
    ))
}

/// PUT `/projects/{id}/contract`
async fn attach_contract(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    multipart: Multipart,
) -> Result<Json<ContractResponse>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let contract = form
        .take_single_file("contract")
        .ok_or_else(|| ApiError::validation("contract file is required"))?;

    let contract_key = document_service(&state).attach_contract(&id, contract).await?;

    info!(project_id = %id, contract = %contract_key, "Contract attached");

    Ok(Json(ContractResponse {
        message: "Contract uploaded successfully".to_string(),
        contract_key,
    }))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
