//! Service layer for SpendWatch
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, persistence and the budget checks that follow every change.

pub mod budget;
pub mod expense;
pub mod monitor;

pub use budget::BudgetService;
pub use expense::{ExpenseChange, ExpenseService, NewExpense};
pub use monitor::{BudgetMonitor, RecheckOutcome, ScopeReport};
