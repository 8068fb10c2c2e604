//! Statement line types.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bank_details::BankDetails;
use crate::dates::serde_format;

/// Credit/debit flag of a statement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditDebit {
    /// Money in.
    #[serde(rename = "CR")]
    Credit,
    /// Money out.
    #[serde(rename = "DR")]
    Debit,
}

impl CreditDebit {
    /// Stored code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Credit => "CR",
            Self::Debit => "DR",
        }
    }
}

impl fmt::Display for CreditDebit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CreditDebit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().trim_end_matches('.') {
            "CR" | "C" | "CREDIT" => Ok(Self::Credit),
            "DR" | "D" | "DEBIT" => Ok(Self::Debit),
            _ => Err(s.to_string()),
        }
    }
}

/// One normalized bank statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransaction {
    /// External transaction identifier, or a generated `TXN…` id.
    pub transaction_id: String,
    /// Value date (`YYYY-MM-DD`).
    #[serde(with = "serde_format::value_date")]
    pub value_date: Option<NaiveDate>,
    /// Posted timestamp (`YYYY-MM-DD HH:MM:SS`).
    #[serde(with = "serde_format::posted_date")]
    pub posted_date: Option<NaiveDateTime>,
    /// Cheque number, `-` when absent.
    pub cheque_number: String,
    /// Narration.
    pub description: String,
    /// Credit or debit.
    pub cr_dr: CreditDebit,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Running balance, may be negative.
    pub balance: Decimal,
    /// Bank-detail annotation, empty at import.
    #[serde(default)]
    pub bank_details: BankDetails,
}

/// Why a data row was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Fewer cells than the right-most mapped column.
    ShortRow {
        /// Cells present.
        cells: usize,
        /// Cells required.
        required: usize,
    },
    /// Neither date could be determined.
    NoDates,
    /// Value date text did not match any pattern; row kept if posted date exists.
    UnparsableValueDate(String),
    /// Posted date text did not match any pattern; row kept if value date exists.
    UnparsablePostedDate(String),
    /// CR/DR flag not recognized.
    UnknownFlag(String),
    /// A reference column is longer than the stored width.
    FieldTooLong {
        /// Column name.
        field: &'static str,
        /// Characters present.
        len: usize,
        /// Characters allowed.
        max: usize,
    },
    /// An amount too large to store.
    AmountOutOfRange {
        /// Column name.
        field: &'static str,
        /// Parsed value.
        value: Decimal,
    },
}

impl IssueKind {
    /// True when the row was excluded from the batch.
    #[must_use]
    pub const fn drops_row(&self) -> bool {
        matches!(
            self,
            Self::ShortRow { .. }
                | Self::NoDates
                | Self::UnknownFlag(_)
                | Self::FieldTooLong { .. }
                | Self::AmountOutOfRange { .. }
        )
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRow { cells, required } => {
                write!(f, "row has {cells} cells, expected at least {required}")
            }
            Self::NoDates => f.write_str("row has neither a value date nor a posted date"),
            Self::UnparsableValueDate(raw) => write!(f, "unparsable value date '{raw}'"),
            Self::UnparsablePostedDate(raw) => write!(f, "unparsable posted date '{raw}'"),
            Self::UnknownFlag(raw) => write!(f, "unknown CR/DR flag '{raw}'"),
            Self::FieldTooLong { field, len, max } => {
                write!(f, "{field} has {len} characters, at most {max} allowed")
            }
            Self::AmountOutOfRange { field, value } => {
                write!(f, "{field} {value} is too large to store")
            }
        }
    }
}

/// A problem found on one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based spreadsheet row number (header is row 1).
    pub row: usize,
    /// What went wrong.
    pub kind: IssueKind,
}

/// Result of ingesting one statement.
#[derive(Debug, Clone, Default)]
pub struct TransactionBatch {
    /// Surviving records in sheet order.
    pub records: Vec<BankTransaction>,
    /// Warnings and dropped rows, in sheet order.
    pub issues: Vec<RowIssue>,
}

impl TransactionBatch {
    /// Number of records that will be persisted.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.records.len()
    }

    /// Number of data rows excluded from the batch.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.issues.iter().filter(|i| i.kind.drops_row()).count()
    }
}
