//! Bank repository. Bank name is the natural key.

use chrono::Utc;
use misboard_core::bank_details::BankAccount;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::banks;

/// Error types for bank operations.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Bank repository.
#[derive(Debug, Clone, Copy)]
pub struct BankRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BankRepository<'a> {
    /// Creates a new bank repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a bank, or overwrites every field of the bank with the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn upsert(&self, account: BankAccount) -> Result<banks::Model, BankError> {
        let details = account.details;
        let active = banks::ActiveModel {
            bank_name: Set(account.bank_name),
            account_no: Set(details.account_no),
            ifsc_code: Set(details.ifsc_code),
            relationship_manager: Set(details.relationship_manager),
            rm_name: Set(details.rm_name),
            rm_email: Set(details.rm_email),
            rm_mobile: Set(details.rm_mobile),
            branch_name: Set(details.branch_name),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = banks::Entity::insert(active)
            .on_conflict(
                OnConflict::column(banks::Column::BankName)
                    .update_columns([
                        banks::Column::AccountNo,
                        banks::Column::IfscCode,
                        banks::Column::RelationshipManager,
                        banks::Column::RmName,
                        banks::Column::RmEmail,
                        banks::Column::RmMobile,
                        banks::Column::BranchName,
                        banks::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(model)
    }

    /// Lists banks by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<banks::Model>, BankError> {
        Ok(banks::Entity::find()
            .order_by_asc(banks::Column::BankName)
            .all(self.db)
            .await?)
    }
}
