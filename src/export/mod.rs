//! Export module for SpendWatch
//!
//! CSV export of a user's expenses (spreadsheet-compatible).

pub mod csv;

pub use self::csv::{default_file_name, export_expenses_csv, EXPENSE_HEADERS};
