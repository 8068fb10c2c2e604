//! Expenditure import paths: JSON payloads and `{Category, Item, Amount,
//! Quarter}` sheets.

use rust_decimal::Decimal;

use crate::money::parse_currency;
use crate::quarter::QuarterTag;
use crate::spreadsheet::{Cell, read_first_sheet};

use super::error::ExpenditureError;
use super::export::EXPORT_HEADER;
use super::types::{ImportCategory, NewExpenditure};

/// Flattens a categorized payload into one row per (category, item).
///
/// Amount text is coerced with [`parse_currency`]; a missing quarter means
/// all quarters. Any invalid item rejects the whole payload.
pub fn flatten_import(payload: &[ImportCategory]) -> Result<Vec<NewExpenditure>, ExpenditureError> {
    let mut rows = Vec::new();
    for group in payload {
        if group.category.trim().is_empty() {
            return Err(ExpenditureError::BlankCategory);
        }
        for item in &group.items {
            let quarter = QuarterTag::parse_optional(item.quarter.as_deref())?;
            rows.push(NewExpenditure::new(
                &group.category,
                &item.name,
                item.amount.to_decimal(),
                quarter,
            )?);
        }
    }

    if rows.is_empty() {
        return Err(ExpenditureError::EmptyImport);
    }
    Ok(rows)
}

/// Decodes an exported expenditure workbook and validates its rows.
pub fn import_workbook(bytes: &[u8]) -> Result<Vec<NewExpenditure>, ExpenditureError> {
    let rows = read_first_sheet(bytes)?;
    import_sheet(&rows)
}

/// Validates `{Category, Item, Amount, Quarter}` rows. Row 0 is the header;
/// blank rows are skipped. The quarter column is optional.
pub fn import_sheet(rows: &[Vec<Cell>]) -> Result<Vec<NewExpenditure>, ExpenditureError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(ExpenditureError::EmptyImport);
    };

    let names: Vec<String> = header
        .iter()
        .map(|cell| cell.as_text().unwrap_or_default().to_ascii_lowercase())
        .collect();
    let find = |wanted: &str| names.iter().position(|name| name == &wanted.to_ascii_lowercase());

    let [category_col, item_col, amount_col, quarter_col] = EXPORT_HEADER.map(find);
    let missing: Vec<&'static str> = [
        (EXPORT_HEADER[0], category_col),
        (EXPORT_HEADER[1], item_col),
        (EXPORT_HEADER[2], amount_col),
    ]
    .into_iter()
    .filter_map(|(name, col)| col.is_none().then_some(name))
    .collect();

    let (Some(category_col), Some(item_col), Some(amount_col)) = (category_col, item_col, amount_col)
    else {
        return Err(ExpenditureError::MissingColumns(missing));
    };

    let text_at = |row: &[Cell], col: usize| row.get(col).and_then(Cell::as_text).unwrap_or_default();

    let mut expenditures = Vec::new();
    for (index, row) in data.iter().enumerate() {
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let amount = match row.get(amount_col) {
            Some(Cell::Number(value)) => *value,
            Some(other) => other.as_text().map_or(Decimal::ZERO, |t| parse_currency(&t)),
            None => Decimal::ZERO,
        };
        let quarter = quarter_col.map(|col| text_at(row, col));

        let parsed = QuarterTag::parse_optional(quarter.as_deref())
            .map_err(ExpenditureError::from)
            .and_then(|quarter| {
                NewExpenditure::new(
                    &text_at(row, category_col),
                    &text_at(row, item_col),
                    amount,
                    quarter,
                )
            });

        match parsed {
            Ok(expenditure) => expenditures.push(expenditure),
            Err(err) => {
                return Err(ExpenditureError::InvalidRow {
                    row: index + 2,
                    reason: err.to_string(),
                });
            }
        }
    }

    if expenditures.is_empty() {
        return Err(ExpenditureError::EmptyImport);
    }
    Ok(expenditures)
}
