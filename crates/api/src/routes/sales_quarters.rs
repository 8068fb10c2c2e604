//! Sales-quarter KPI routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::info;

use misboard_core::sales::SalesQuarterInput;
use misboard_db::entities::sales_quarters;
use misboard_db::repositories::SalesQuarterRepository;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// Creates the sales-quarter routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sales-quarters", get(list_sales_quarters).post(create_sales_quarter))
}

/// Create result.
#[derive(Debug, Serialize)]
pub struct SalesQuarterCreated {
    /// Human-readable summary.
    pub message: String,
    /// The stored record.
    pub record: sales_quarters::Model,
}

/// GET `/sales-quarters`
async fn list_sales_quarters(
    State(state): State<AppState>,
) -> Result<Json<Vec<sales_quarters::Model>>, ApiError> {
    let repo = SalesQuarterRepository::new(&state.db);
    Ok(Json(repo.list_all().await?))
}

/// POST `/sales-quarters`
/// Rejects out-of-range figures and a second record for the same quarter.
async fn create_sales_quarter(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SalesQuarterInput>,
) -> Result<(StatusCode, Json<SalesQuarterCreated>), ApiError> {
    let record = payload.validate()?;
    let total = record.total_sales();

    let repo = SalesQuarterRepository::new(&state.db);
    let record = repo.create(&record).await?;

    info!(quarter = %record.quarter, total_sales = %total, "Sales quarter recorded");

    Ok((
        StatusCode::CREATED,
        Json(SalesQuarterCreated {
            message: format!("Sales figures for {} saved", record.quarter),
            record,
        }),
    ))
}
