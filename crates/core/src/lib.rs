//! Core business logic for Misboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Spreadsheet parsing, normalization, grouping and validation rules live here.
//!
//! # Modules
//!
//! - `money` - Currency parsing and Indian-grouped display
//! - `dates` - Statement date normalization
//! - `quarter` - Business quarter labels and filters
//! - `spreadsheet` - Workbook read/write adapter
//! - `bill` - Bank statement ingestion
//! - `expenditure` - Expenditure import, grouping and export
//! - `sales` - Sales-quarter KPI validation
//! - `bank_details` - Typed bank-detail annotation
//! - `project` - Projects and their line items
//! - `storage` - Document storage (OpenDAL)
//! - `document` - Receipts and contracts bound to projects

pub mod bank_details;
pub mod bill;
pub mod dates;
pub mod document;
pub mod expenditure;
pub mod money;
pub mod project;
pub mod quarter;
pub mod sales;
pub mod spreadsheet;
pub mod storage;
