//! Row normalization.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::bank_details::BankDetails;
use crate::dates::{parse_posted_date, parse_value_date};
use crate::money::{parse_currency, round_currency};
use crate::spreadsheet::{Cell, read_first_sheet};

use super::columns::{ColumnMap, StatementField};
use super::error::IngestError;
use super::types::{BankTransaction, CreditDebit, IssueKind, RowIssue, TransactionBatch};

/// Cheque number stored when the column is absent or blank.
const NO_CHEQUE: &str = "-";

/// Longest transaction id or cheque number the statement table stores.
const MAX_REFERENCE_LEN: usize = 64;

/// Decodes a statement workbook and ingests its first sheet.
///
/// `stamp` seeds generated transaction ids (`TXN{stamp}{index}`); callers
/// pass the current epoch milliseconds.
pub fn ingest_workbook(bytes: &[u8], stamp: i64) -> Result<TransactionBatch, IngestError> {
    let rows = read_first_sheet(bytes)?;
    ingest_rows(&rows, stamp)
}

/// Ingests already-decoded rows. Row 0 is the header.
///
/// Fails only when the header is unusable or no data row survives.
pub fn ingest_rows(rows: &[Vec<Cell>], stamp: i64) -> Result<TransactionBatch, IngestError> {
    let (header, data) = rows.split_first().ok_or(IngestError::EmptySheet)?;
    let columns = ColumnMap::from_header(header)?;
    let required = columns.min_width();

    let mut batch = TransactionBatch::default();
    for (index, row) in data.iter().enumerate() {
        let row_number = index + 2;

        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let mut issues = Vec::new();
        let record = if row.len() < required {
            issues.push(IssueKind::ShortRow {
                cells: row.len(),
                required,
            });
            None
        } else {
            normalize_row(&columns, row, index, stamp, &mut issues)
        };

        batch.issues.extend(
            issues
                .into_iter()
                .map(|kind| RowIssue { row: row_number, kind }),
        );
        if let Some(record) = record {
            batch.records.push(record);
        }
    }

    if batch.records.is_empty() {
        return Err(IngestError::NoValidRows {
            skipped: batch.skipped(),
        });
    }

    Ok(batch)
}

fn normalize_row(
    columns: &ColumnMap,
    row: &[Cell],
    index: usize,
    stamp: i64,
    issues: &mut Vec<IssueKind>,
) -> Option<BankTransaction> {
    let field = |f: StatementField| columns.cell(row, f);

    let value_date = read_value_date(field(StatementField::ValueDate)).unwrap_or_else(|raw| {
        issues.push(IssueKind::UnparsableValueDate(raw));
        None
    });
    let posted_date = read_posted_date(field(StatementField::PostedDate)).unwrap_or_else(|raw| {
        issues.push(IssueKind::UnparsablePostedDate(raw));
        None
    });
    if value_date.is_none() && posted_date.is_none() {
        issues.push(IssueKind::NoDates);
        return None;
    }

    let flag = field(StatementField::CrDr).as_text().unwrap_or_default();
    let cr_dr = match flag.parse::<CreditDebit>() {
        Ok(cr_dr) => cr_dr,
        Err(raw) => {
            issues.push(IssueKind::UnknownFlag(raw));
            return None;
        }
    };

    let transaction_id = field(StatementField::TransactionId)
        .as_text()
        .unwrap_or_else(|| format!("TXN{stamp}{index}"));
    let cheque_number = field(StatementField::ChequeNumber)
        .as_text()
        .unwrap_or_else(|| NO_CHEQUE.to_string());
    let amount = read_amount(field(StatementField::Amount)).abs();
    let balance = read_amount(field(StatementField::Balance));

    let before = issues.len();
    let references = [
        ("transaction id", &transaction_id),
        ("cheque number", &cheque_number),
    ];
    for (name, value) in references {
        let len = value.chars().count();
        if len > MAX_REFERENCE_LEN {
            issues.push(IssueKind::FieldTooLong {
                field: name,
                len,
                max: MAX_REFERENCE_LEN,
            });
        }
    }
    for (name, value) in [("amount", amount), ("balance", balance)] {
        if value.abs() >= amount_limit() {
            issues.push(IssueKind::AmountOutOfRange { field: name, value });
        }
    }
    if issues.len() > before {
        return None;
    }

    Some(BankTransaction {
        transaction_id,
        value_date,
        posted_date,
        cheque_number,
        description: field(StatementField::Description)
            .as_text()
            .unwrap_or_default(),
        cr_dr,
        amount,
        balance,
        bank_details: BankDetails::default(),
    })
}

/// Magnitudes at or above this do not fit a `NUMERIC(14, 2)` column.
fn amount_limit() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// `Ok(None)` for a blank cell, `Err(raw)` for text matching no pattern.
fn read_value_date(cell: &Cell) -> Result<Option<NaiveDate>, String> {
    match cell {
        Cell::DateTime(value) => Ok(Some(value.date())),
        Cell::Text(text) => match parse_value_date(text) {
            Some(date) => Ok(Some(date)),
            None if text.trim().is_empty() => Ok(None),
            None => Err(text.trim().to_string()),
        },
        Cell::Empty => Ok(None),
        other => Err(other.as_text().unwrap_or_default()),
    }
}

fn read_posted_date(cell: &Cell) -> Result<Option<NaiveDateTime>, String> {
    match cell {
        Cell::DateTime(value) => Ok(Some(*value)),
        Cell::Text(text) => match parse_posted_date(text) {
            Some(date) => Ok(Some(date)),
            None if text.trim().is_empty() => Ok(None),
            None => Err(text.trim().to_string()),
        },
        Cell::Empty => Ok(None),
        other => Err(other.as_text().unwrap_or_default()),
    }
}

fn read_amount(cell: &Cell) -> Decimal {
    let raw = match cell {
        Cell::Number(value) => *value,
        other => other
            .as_text()
            .map_or(Decimal::ZERO, |text| parse_currency(&text)),
    };
    round_currency(raw)
}
