//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, budget status and alert
//! history for the terminal.

pub mod expense;
pub mod status;

pub use expense::{format_expense_details, format_expense_list};
pub use status::{
    format_alert_history, format_budget_list, format_category_totals, format_status_table,
};
