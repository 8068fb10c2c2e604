//! Database migration runner for Misboard.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL` from the environment or `.env`.

use misboard_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
