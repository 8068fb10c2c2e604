//! `SeaORM` entities, one module per table.

pub mod banks;
pub mod bd_expenditures;
pub mod bill_expenditures;
pub mod expenditures;
pub mod project_line_items;
pub mod projects;
pub mod sales_quarters;
