//! Repository abstractions for data access.
//!
//! Repositories form the persistence gateway: bulk imports run inside one
//! transaction, single-row writers are plain insert or update-by-id.

pub mod bank;
pub mod bill_expenditure;
pub mod expenditure;
pub mod project;
pub mod sales_quarter;

pub use bank::{BankError, BankRepository};
pub use bill_expenditure::{BillExpenditureError, BillExpenditureRepository, StoredTransaction};
pub use expenditure::{ExpenditureRepoError, ExpenditureRepository};
pub use project::{ProjectRepoError, ProjectRepository};
pub use sales_quarter::{SalesQuarterError, SalesQuarterRepository};
