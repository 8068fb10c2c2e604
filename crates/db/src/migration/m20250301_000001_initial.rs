//! Initial database migration.
//!
//! Creates the reporting tables: imported statement lines, expenditures,
//! sales quarters and banks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(BILL_EXPENDITURES_SQL).await?;
        db.execute_unprepared(EXPENDITURES_SQL).await?;
        db.execute_unprepared(SALES_QUARTERS_SQL).await?;
        db.execute_unprepared(BANKS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

// transaction_id is not unique across statements.
const BILL_EXPENDITURES_SQL: &str = r"
CREATE TABLE bill_expenditures (
    id BIGSERIAL PRIMARY KEY,
    transaction_id VARCHAR(64) NOT NULL,
    value_date DATE,
    posted_date TIMESTAMP,
    cheque_number VARCHAR(64) NOT NULL DEFAULT '-',
    description TEXT NOT NULL DEFAULT '',
    cr_dr VARCHAR(2) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    balance NUMERIC(14, 2) NOT NULL DEFAULT 0,
    bank_details JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_bill_cr_dr CHECK (cr_dr IN ('CR', 'DR')),
    CONSTRAINT chk_bill_amount CHECK (amount >= 0),
    CONSTRAINT chk_bill_dates CHECK (value_date IS NOT NULL OR posted_date IS NOT NULL)
);

CREATE INDEX idx_bill_expenditures_transaction ON bill_expenditures(transaction_id);
";

const EXPENDITURES_SQL: &str = r"
CREATE TABLE expenditures (
    id SERIAL PRIMARY KEY,
    category VARCHAR(255) NOT NULL,
    item_name VARCHAR(255) NOT NULL,
    amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    quarter VARCHAR(32) NOT NULL DEFAULT 'All Quarters',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_expenditure_amount CHECK (amount >= 0),
    CONSTRAINT chk_expenditure_quarter CHECK (
        quarter IN ('Mar-May', 'Jun-Aug', 'Sep-Nov', 'Dec-Feb', 'All Quarters')
    )
);

CREATE INDEX idx_expenditures_category ON expenditures(category);
CREATE INDEX idx_expenditures_quarter ON expenditures(quarter);
";

const SALES_QUARTERS_SQL: &str = r"
CREATE TABLE sales_quarters (
    id SERIAL PRIMARY KEY,
    quarter VARCHAR(32) NOT NULL,
    direct_sales NUMERIC(14, 2) NOT NULL DEFAULT 0,
    institutional_sales NUMERIC(14, 2) NOT NULL DEFAULT 0,
    channel_sales NUMERIC(14, 2) NOT NULL DEFAULT 0,
    online_sales NUMERIC(14, 2) NOT NULL DEFAULT 0,
    target NUMERIC(14, 2) NOT NULL DEFAULT 0,
    forecasted_sales NUMERIC(14, 2) NOT NULL DEFAULT 0,
    hit_percentage NUMERIC(5, 2) NOT NULL DEFAULT 0,
    achieved_percentage NUMERIC(5, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_sales_quarter UNIQUE (quarter),
    CONSTRAINT chk_sales_hit CHECK (hit_percentage BETWEEN 0 AND 100),
    CONSTRAINT chk_sales_achieved CHECK (achieved_percentage BETWEEN 0 AND 100)
);
";

const BANKS_SQL: &str = r"
CREATE TABLE banks (
    id SERIAL PRIMARY KEY,
    bank_name VARCHAR(255) NOT NULL,
    account_no VARCHAR(64),
    ifsc_code VARCHAR(11),
    relationship_manager VARCHAR(255),
    rm_name VARCHAR(255),
    rm_email VARCHAR(255),
    rm_mobile VARCHAR(32),
    branch_name VARCHAR(255),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_bank_name UNIQUE (bank_name)
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS banks CASCADE;
DROP TABLE IF EXISTS sales_quarters CASCADE;
DROP TABLE IF EXISTS expenditures CASCADE;
DROP TABLE IF EXISTS bill_expenditures CASCADE;
";
