//! Workbook decoding via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::cell::Cell;
use super::error::SpreadsheetError;

/// Decodes the first worksheet of an `.xlsx`/`.xls`/`.ods` payload.
///
/// Rows are returned in sheet order starting at the first used row. Trailing
/// empty cells are kept as [`Cell::Empty`] so every row spans the used range.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(convert).collect())
        .collect())
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            Cell::Text(text.clone())
        }
        Data::Int(value) => Cell::Number(Decimal::from(*value)),
        Data::Float(value) => Decimal::from_f64(*value)
            .map_or(Cell::Empty, |number| Cell::Number(number.normalize())),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or(Cell::Empty, Cell::DateTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::write_sheet;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_back_written_sheet() {
        let rows = vec![
            vec![Cell::text("Category"), Cell::text("Amount")],
            vec![Cell::text("Rent"), Cell::Number(dec!(1200.5))],
            vec![Cell::text("Utilities"), Cell::Empty],
        ];
        let bytes = write_sheet("Sheet1", &rows).expect("should write");

        let decoded = read_first_sheet(&bytes).expect("should read");
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0][0], Cell::text("Category"));
        assert_eq!(decoded[1][1], Cell::Number(dec!(1200.5)));
        assert!(decoded[2][1].is_blank());
    }

    #[test]
    fn test_garbage_payload_is_unreadable() {
        let err = read_first_sheet(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, SpreadsheetError::Unreadable(_)));
    }
}
