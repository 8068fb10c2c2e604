//! Expenditure workbook export.

use crate::money::format_currency;
use crate::quarter::QuarterFilter;
use crate::spreadsheet::{Cell, write_sheet};

use super::error::ExpenditureError;
use super::types::CategoryGroup;

/// Fixed export column order.
pub const EXPORT_HEADER: [&str; 4] = ["Category", "Item", "Amount", "Quarter"];

const SHEET_NAME: &str = "Expenditures";

/// A rendered export ready for download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested download filename.
    pub filename: String,
    /// `.xlsx` payload.
    pub bytes: Vec<u8>,
}

/// Download filename for a quarter filter, e.g. `expenditures_Mar-May.xlsx`.
#[must_use]
pub fn export_filename(filter: QuarterFilter) -> String {
    let label = match filter {
        QuarterFilter::All => "All_Quarters",
        QuarterFilter::Only(quarter) => quarter.label(),
    };
    format!("expenditures_{label}.xlsx")
}

/// Re-flattens grouped expenditures into header + data cells. Amounts are
/// rendered as grouped currency strings.
#[must_use]
pub fn export_cells(groups: &[CategoryGroup]) -> Vec<Vec<Cell>> {
    let header = EXPORT_HEADER.iter().map(|name| Cell::text(*name)).collect();

    std::iter::once(header)
        .chain(groups.iter().flat_map(|group| {
            group.items.iter().map(|item| {
                vec![
                    Cell::text(group.category.as_str()),
                    Cell::text(item.name.as_str()),
                    Cell::Text(format_currency(item.amount)),
                    Cell::text(item.quarter.label()),
                ]
            })
        }))
        .collect()
}

/// Renders grouped expenditures as an `.xlsx` download.
pub fn export_workbook(
    groups: &[CategoryGroup],
    filter: QuarterFilter,
) -> Result<ExportFile, ExpenditureError> {
    let bytes = write_sheet(SHEET_NAME, &export_cells(groups))?;
    Ok(ExportFile {
        filename: export_filename(filter),
        bytes,
    })
}
