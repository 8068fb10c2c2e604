//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - The JSON error envelope (`ApiError`)
//! - Request extractors with 400 rejections

pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use misboard_core::storage::StorageService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Document storage for contracts and receipts.
    pub storage: Arc<StorageService>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
