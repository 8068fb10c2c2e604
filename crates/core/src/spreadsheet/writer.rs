//! Workbook encoding via rust_xlsxwriter.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use super::cell::Cell;
use super::error::SpreadsheetError;

/// Encodes rows into a single-sheet `.xlsx` workbook.
///
/// The first row is written bold as the header row.
pub fn write_sheet(sheet_name: &str, rows: &[Vec<Cell>]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx)
            .map_err(|_| SpreadsheetError::Write("too many rows".to_string()))?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = u16::try_from(col_idx)
                .map_err(|_| SpreadsheetError::Write("too many columns".to_string()))?;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) if row_idx == 0 => {
                    worksheet.write_string_with_format(row_num, col_num, text, &header)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col_num, text)?;
                }
                Cell::Number(value) => {
                    let number = value.to_f64().ok_or_else(|| {
                        SpreadsheetError::Write(format!("amount out of range: {value}"))
                    })?;
                    worksheet.write_number(row_num, col_num, number)?;
                }
                Cell::DateTime(value) => {
                    worksheet.write_string(
                        row_num,
                        col_num,
                        value.format("%Y-%m-%d %H:%M:%S").to_string(),
                    )?;
                }
                Cell::Bool(value) => {
                    worksheet.write_boolean(row_num, col_num, *value)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}
