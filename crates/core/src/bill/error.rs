//! Statement ingestion errors.

use thiserror::Error;

use crate::spreadsheet::SpreadsheetError;

/// Whole-batch ingestion failures.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The workbook could not be decoded.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// The sheet has no header row.
    #[error("spreadsheet is empty")]
    EmptySheet,

    /// Required columns are absent from the header row.
    #[error("missing column {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// Every data row was dropped (or there were none).
    #[error("no valid transactions found in spreadsheet ({skipped} rows skipped)")]
    NoValidRows {
        /// Number of dropped data rows.
        skipped: usize,
    },
}
