//! Sales-quarter repository. Records are append-only, one per quarter label.

use chrono::Utc;
use misboard_core::sales::NewSalesQuarter;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::sales_quarters;

/// Error types for sales-quarter operations.
#[derive(Debug, thiserror::Error)]
pub enum SalesQuarterError {
    /// A record for this quarter already exists.
    #[error("Sales figures for {0} already exist")]
    Duplicate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Sales-quarter repository.
#[derive(Debug, Clone, Copy)]
pub struct SalesQuarterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SalesQuarterRepository<'a> {
    /// Creates a new sales-quarter repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated record.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the quarter already has a record, or a
    /// database error.
    pub async fn create(
        &self,
        record: &NewSalesQuarter,
    ) -> Result<sales_quarters::Model, SalesQuarterError> {
        let label = record.quarter.label();

        let existing = sales_quarters::Entity::find()
            .filter(sales_quarters::Column::Quarter.eq(label))
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Err(SalesQuarterError::Duplicate(label.to_string()));
        }

        let active = sales_quarters::ActiveModel {
            quarter: Set(label.to_string()),
            direct_sales: Set(record.direct_sales),
            institutional_sales: Set(record.institutional_sales),
            channel_sales: Set(record.channel_sales),
            online_sales: Set(record.online_sales),
            target: Set(record.target),
            forecasted_sales: Set(record.forecasted_sales),
            hit_percentage: Set(record.hit_percentage),
            achieved_percentage: Set(record.achieved_percentage),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // The unique constraint still guards concurrent inserts.
        active.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                SalesQuarterError::Duplicate(label.to_string())
            }
            _ => SalesQuarterError::Database(e),
        })
    }

    /// Lists all records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<sales_quarters::Model>, SalesQuarterError> {
        Ok(sales_quarters::Entity::find()
            .order_by_asc(sales_quarters::Column::Id)
            .all(self.db)
            .await?)
    }
}
