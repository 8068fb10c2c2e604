//! Bank statement ("bill expenditure") ingestion.
//!
//! A statement workbook is decoded, its header row is matched against the
//! known column names, and every data row is normalized into a
//! [`BankTransaction`]. Row-level problems never fail the call; they are
//! returned as [`RowIssue`]s next to the surviving records.

mod columns;
mod error;
mod ingest;
mod types;


pub use columns::{ColumnMap, StatementField};
pub use error::IngestError;
pub use ingest::{ingest_rows, ingest_workbook};
pub use types::{BankTransaction, CreditDebit, IssueKind, RowIssue, TransactionBatch};
