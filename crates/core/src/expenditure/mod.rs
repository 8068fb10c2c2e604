//! Expenditure import, grouping and export.
//!
//! Expenditure items are stored flat (`category`, `item_name`, `amount`,
//! `quarter`). Categories are not an entity of their own; they are
//! recomputed from the flat rows on every read by [`group_by_category`].

mod error;
mod export;
mod grouping;
mod import;
mod types;

#[cfg(test)]
mod grouping_props;
#[cfg(test)]
mod tests;

pub use error::ExpenditureError;
pub use export::{EXPORT_HEADER, ExportFile, export_cells, export_filename, export_workbook};
pub use grouping::{CategoryTotal, ExpenditureTotals, group_by_category, totals};
pub use import::{flatten_import, import_sheet, import_workbook};
pub use types::{
    CategoryGroup, ExpenditureRow, GroupedItem, ImportCategory, ImportItem, ItemChanges,
    NewExpenditure, RawAmount, UpdatedItem,
};
