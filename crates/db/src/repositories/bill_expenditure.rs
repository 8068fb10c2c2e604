//! Bill expenditure repository: imported bank statement lines.

use chrono::Utc;
use misboard_core::bank_details::BankDetails;
use misboard_core::bill::{BankTransaction, CreditDebit};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use crate::entities::bill_expenditures;

/// Error types for bill expenditure operations.
#[derive(Debug, thiserror::Error)]
pub enum BillExpenditureError {
    /// No row with this id.
    #[error("Transaction not found: {0}")]
    NotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A persisted statement line: the row id plus the normalized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredTransaction {
    /// Row id, used to address the line in updates.
    pub id: i64,
    /// The statement line.
    #[serde(flatten)]
    pub transaction: BankTransaction,
}

/// Bill expenditure repository.
#[derive(Debug, Clone, Copy)]
pub struct BillExpenditureRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BillExpenditureRepository<'a> {
    /// Creates a new bill expenditure repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated batch inside one transaction, in batch order.
    /// Any failed insert rolls the whole batch back.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert or the commit fails.
    pub async fn import_batch(
        &self,
        records: &[BankTransaction],
    ) -> Result<usize, BillExpenditureError> {
        let txn = self.db.begin().await?;

        for record in records {
            to_active_model(record)?.insert(&txn).await?;
        }

        txn.commit().await?;
        debug!(rows = records.len(), "Statement batch committed");
        Ok(records.len())
    }

    /// Lists every imported line in import order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub async fn list_all(&self) -> Result<Vec<StoredTransaction>, BillExpenditureError> {
        let models = bill_expenditures::Entity::find()
            .order_by_asc(bill_expenditures::Column::Id)
            .all(self.db)
            .await?;

        models
            .into_iter()
            .map(|model| to_domain(model).map_err(Into::into))
            .collect()
    }

    /// Replaces the bank-detail annotation of one line.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no line has this id, or a database error.
    pub async fn update_bank_details(
        &self,
        id: i64,
        details: &BankDetails,
    ) -> Result<StoredTransaction, BillExpenditureError> {
        let model = bill_expenditures::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(BillExpenditureError::NotFound(id))?;

        let mut active: bill_expenditures::ActiveModel = model.into();
        active.bank_details = Set(details_to_json(details)?);

        let updated = active.update(self.db).await?;
        Ok(to_domain(updated)?)
    }
}

fn details_to_json(details: &BankDetails) -> Result<serde_json::Value, DbErr> {
    serde_json::to_value(details).map_err(|e| DbErr::Json(e.to_string()))
}

fn to_active_model(record: &BankTransaction) -> Result<bill_expenditures::ActiveModel, DbErr> {
    Ok(bill_expenditures::ActiveModel {
        transaction_id: Set(record.transaction_id.clone()),
        value_date: Set(record.value_date),
        posted_date: Set(record.posted_date),
        cheque_number: Set(record.cheque_number.clone()),
        description: Set(record.description.clone()),
        cr_dr: Set(record.cr_dr.code().to_string()),
        amount: Set(record.amount),
        balance: Set(record.balance),
        bank_details: Set(details_to_json(&record.bank_details)?),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    })
}

/// Convert database model to domain model.
fn to_domain(model: bill_expenditures::Model) -> Result<StoredTransaction, DbErr> {
    let cr_dr: CreditDebit = model
        .cr_dr
        .parse()
        .map_err(|flag| DbErr::Type(format!("stored CR/DR flag '{flag}'")))?;
    let bank_details: BankDetails =
        serde_json::from_value(model.bank_details).map_err(|e| DbErr::Json(e.to_string()))?;

    Ok(StoredTransaction {
        id: model.id,
        transaction: BankTransaction {
            transaction_id: model.transaction_id,
            value_date: model.value_date,
            posted_date: model.posted_date,
            cheque_number: model.cheque_number,
            description: model.description,
            cr_dr,
            amount: model.amount,
            balance: model.balance,
            bank_details,
        },
    })
}
