//! Misboard API Server
//!
//! Main entry point for the MIS dashboard backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use misboard_api::{AppState, create_router};
use misboard_core::storage::{StorageConfig, StorageProvider, StorageService};
use misboard_db::connect;
use misboard_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "misboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Document storage
    let storage_config = StorageConfig::new(StorageProvider::local_fs(&config.storage.root))
        .with_max_file_size(config.storage.max_file_size);
    let storage = StorageService::from_config(storage_config)?;
    info!(
        provider = storage.provider_name(),
        root = %config.storage.root,
        "Document storage configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
        max_upload_bytes: config.import.max_upload_bytes,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
