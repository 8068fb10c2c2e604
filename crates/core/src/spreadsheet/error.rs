//! Spreadsheet codec errors.

use thiserror::Error;

/// Errors raised while decoding or encoding a workbook.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The payload is not a readable workbook.
    #[error("unable to read workbook: {0}")]
    Unreadable(String),

    /// The workbook has no worksheet.
    #[error("workbook contains no worksheet")]
    NoWorksheet,

    /// Encoding the output workbook failed.
    #[error("unable to write workbook: {0}")]
    Write(String),
}

impl From<calamine::Error> for SpreadsheetError {
    fn from(err: calamine::Error) -> Self {
        Self::Unreadable(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SpreadsheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(err.to_string())
    }
}
