//! Expenditure repository.
//!
//! Rows are stored flat; grouping by category happens in core on every read.

use chrono::Utc;
use misboard_core::expenditure::{ExpenditureRow, ItemChanges, NewExpenditure};
use misboard_core::quarter::{QuarterFilter, QuarterTag};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use tracing::debug;

use crate::entities::expenditures;

/// Error types for expenditure operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenditureRepoError {
    /// No row with this id.
    #[error("Expenditure not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Expenditure repository.
#[derive(Debug, Clone, Copy)]
pub struct ExpenditureRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ExpenditureRepository<'a> {
    /// Creates a new expenditure repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Bulk import: one transaction, rows inserted in order, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert or the commit fails.
    pub async fn import_rows(&self, rows: &[NewExpenditure]) -> Result<usize, ExpenditureRepoError> {
        let txn = self.db.begin().await?;

        for row in rows {
            to_active_model(row).insert(&txn).await?;
        }

        txn.commit().await?;
        debug!(rows = rows.len(), "Expenditure import committed");
        Ok(rows.len())
    }

    /// Inserts a single expenditure item.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, row: &NewExpenditure) -> Result<ExpenditureRow, ExpenditureRepoError> {
        let model = to_active_model(row).insert(self.db).await?;
        Ok(to_domain(model)?)
    }

    /// Lists items in insertion order, optionally restricted to one quarter
    /// label (exact match).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, filter: QuarterFilter) -> Result<Vec<ExpenditureRow>, ExpenditureRepoError> {
        let mut query = expenditures::Entity::find();
        if let QuarterFilter::Only(quarter) = filter {
            query = query.filter(expenditures::Column::Quarter.eq(quarter.label()));
        }

        let models = query
            .order_by_asc(expenditures::Column::Id)
            .all(self.db)
            .await?;

        models
            .into_iter()
            .map(|model| to_domain(model).map_err(Into::into))
            .collect()
    }

    /// Replaces name, amount and quarter of one item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item has this id, or a database error.
    pub async fn update_item(
        &self,
        id: i32,
        changes: ItemChanges,
    ) -> Result<ExpenditureRow, ExpenditureRepoError> {
        let model = expenditures::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ExpenditureRepoError::NotFound(id))?;

        let mut active: expenditures::ActiveModel = model.into();
        active.item_name = Set(changes.item_name);
        active.amount = Set(changes.amount);
        active.quarter = Set(changes.quarter.label().to_string());

        let updated = active.update(self.db).await?;
        Ok(to_domain(updated)?)
    }

    /// Deletes every item of a category in one statement. Returns the number
    /// of rows removed; an unknown category removes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn delete_category(&self, category: &str) -> Result<u64, ExpenditureRepoError> {
        let result = expenditures::Entity::delete_many()
            .filter(expenditures::Column::Category.eq(category))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn to_active_model(row: &NewExpenditure) -> expenditures::ActiveModel {
    expenditures::ActiveModel {
        category: Set(row.category.clone()),
        item_name: Set(row.item_name.clone()),
        amount: Set(row.amount),
        quarter: Set(row.quarter.label().to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

fn to_domain(model: expenditures::Model) -> Result<ExpenditureRow, DbErr> {
    let quarter: QuarterTag = model
        .quarter
        .parse()
        .map_err(|e| DbErr::Type(format!("stored quarter: {e}")))?;

    Ok(ExpenditureRow {
        id: model.id,
        category: model.category,
        item_name: model.item_name,
        amount: model.amount,
        quarter,
    })
}
