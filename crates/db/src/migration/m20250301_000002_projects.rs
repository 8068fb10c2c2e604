//! Projects with their CAPX/OPX line items and BD expenditures.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(PROJECT_LINE_ITEMS_SQL).await?;
        db.execute_unprepared(BD_EXPENDITURES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    client VARCHAR(255),
    description TEXT,
    status VARCHAR(16) NOT NULL DEFAULT 'active',
    start_date DATE,
    end_date DATE,
    budget NUMERIC(14, 2) NOT NULL DEFAULT 0,
    contract_key VARCHAR(512),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_project_status CHECK (status IN ('active', 'on_hold', 'completed', 'cancelled')),
    CONSTRAINT chk_project_dates CHECK (end_date IS NULL OR start_date IS NULL OR end_date >= start_date)
);
";

const PROJECT_LINE_ITEMS_SQL: &str = r"
CREATE TABLE project_line_items (
    id SERIAL PRIMARY KEY,
    project_id VARCHAR(64) NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    kind VARCHAR(4) NOT NULL,
    item VARCHAR(255) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    vendor VARCHAR(255),
    incurred_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_line_kind CHECK (kind IN ('capx', 'opx')),
    CONSTRAINT chk_line_amount CHECK (amount >= 0)
);

CREATE INDEX idx_project_line_items_project ON project_line_items(project_id, kind);
";

const BD_EXPENDITURES_SQL: &str = r"
CREATE TABLE bd_expenditures (
    id SERIAL PRIMARY KEY,
    project_id VARCHAR(64) NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    spent_on DATE,
    receipt_key VARCHAR(512) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_bd_amount CHECK (amount >= 0)
);

CREATE INDEX idx_bd_expenditures_project ON bd_expenditures(project_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS bd_expenditures CASCADE;
DROP TABLE IF EXISTS project_line_items CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
";
