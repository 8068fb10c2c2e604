//! Spreadsheet codec.
//!
//! Thin adapter over `calamine` (read) and `rust_xlsxwriter` (write). The rest
//! of the crate only sees rows of [`Cell`] values.

mod cell;
mod error;
mod reader;
mod writer;

pub use cell::Cell;
pub use error::SpreadsheetError;
pub use reader::read_first_sheet;
pub use writer::write_sheet;

/// MIME type for `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
