//! Expenditure errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::quarter::QuarterParseError;
use crate::spreadsheet::SpreadsheetError;

/// Expenditure validation and import errors.
#[derive(Debug, Error)]
pub enum ExpenditureError {
    /// Category name is empty.
    #[error("category is required")]
    BlankCategory,

    /// Item name is empty.
    #[error("item name is required in category '{category}'")]
    BlankItemName {
        /// Category holding the item.
        category: String,
    },

    /// Amount below zero.
    #[error("amount for '{item}' must not be negative, got {amount}")]
    NegativeAmount {
        /// Item name.
        item: String,
        /// Offending amount.
        amount: Decimal,
    },

    /// Quarter label not recognized.
    #[error(transparent)]
    InvalidQuarter(#[from] QuarterParseError),

    /// Payload or sheet had no items.
    #[error("no expenditure items to import")]
    EmptyImport,

    /// Required sheet columns are absent.
    #[error("missing column {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// A sheet row failed validation.
    #[error("row {row}: {reason}")]
    InvalidRow {
        /// 1-based spreadsheet row number.
        row: usize,
        /// Validation failure.
        reason: String,
    },

    /// Workbook decoding or encoding failed.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}
