//! Expense model
//!
//! A single outflow logged by a user against a category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{ExpenseId, UserId};

/// A logged expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Owner of the expense
    pub user_id: UserId,

    /// Short description ("Groceries at market")
    pub label: String,

    /// Amount spent, never negative
    pub value: f64,

    pub date: NaiveDate,

    #[serde(default)]
    pub category: Category,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by `ExpenseService::update`
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub label: Option<String>,
    pub value: Option<f64>,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.value.is_none() && self.date.is_none() && self.category.is_none()
    }
}

impl Expense {
    /// Create a new expense
    pub fn new(
        user_id: UserId,
        label: impl Into<String>,
        value: f64,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            user_id,
            label: label.into().trim().to_string(),
            value,
            date,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, returning the categories touched (old and new)
    pub fn apply(&mut self, patch: ExpensePatch) -> Vec<Category> {
        let mut touched = vec![self.category];

        if let Some(label) = patch.label {
            self.label = label.trim().to_string();
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(category) = patch.category {
            if category != self.category {
                touched.push(category);
            }
            self.category = category;
        }

        self.updated_at = Utc::now();
        touched
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.label.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyLabel);
        }

        if self.label.len() > 100 {
            return Err(ExpenseValidationError::LabelTooLong(self.label.len()));
        }

        if !self.value.is_finite() || self.value < 0.0 {
            return Err(ExpenseValidationError::InvalidValue(self.value));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} ({})",
            self.date, self.label, self.value, self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyLabel,
    LabelTooLong(usize),
    InvalidValue(f64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Expense label cannot be empty"),
            Self::LabelTooLong(len) => {
                write!(f, "Expense label too long ({} chars, max 100)", len)
            }
            Self::InvalidValue(value) => {
                write!(f, "Expense value must be a non-negative number, got {}", value)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
