//! Core data models for SpendWatch
//!
//! Expenses, budgets, categories and the scopes budgets apply to.

pub mod amount;
pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod month;

pub use amount::format_amount;
pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, ScopeId, UnknownCategory};
pub use expense::{Expense, ExpensePatch, ExpenseValidationError};
pub use ids::{BudgetId, ExpenseId, UserId};
pub use month::{Month, MonthParseError};
