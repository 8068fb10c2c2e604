//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod banks;
pub mod bill_expenditures;
pub mod documents;
pub mod expenditures;
pub mod health;
pub mod projects;
pub mod sales_quarters;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(bill_expenditures::routes())
        .merge(expenditures::routes())
        .merge(sales_quarters::routes())
        .merge(banks::routes())
        .merge(projects::routes())
        .merge(documents::routes())
}
