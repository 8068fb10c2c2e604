//! Bank registry routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::info;

use misboard_core::bank_details::BankAccount;
use misboard_db::entities::banks;
use misboard_db::repositories::BankRepository;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// Creates the bank routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/banks", get(list_banks).post(save_bank))
}

/// Save result.
#[derive(Debug, Serialize)]
pub struct BankSaved {
    /// Human-readable summary.
    pub message: String,
    /// The stored bank.
    pub bank: banks::Model,
}

/// GET `/banks`
async fn list_banks(State(state): State<AppState>) -> Result<Json<Vec<banks::Model>>, ApiError> {
    let repo = BankRepository::new(&state.db);
    Ok(Json(repo.list_all().await?))
}

/// POST `/banks`
/// Saving an existing bank name overwrites its details.
async fn save_bank(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BankAccount>,
) -> Result<Json<BankSaved>, ApiError> {
    let account = payload.validate()?;

    let repo = BankRepository::new(&state.db);
    let bank = repo.upsert(account).await?;

    info!(bank = %bank.bank_name, "Bank details saved");

    Ok(Json(BankSaved {
        message: format!("Bank '{}' saved", bank.bank_name),
        bank,
    }))
}
