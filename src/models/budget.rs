//! Budget limit model
//!
//! One limit per user per scope (overall or a category).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ScopeId;
use super::ids::{BudgetId, UserId};

/// A spending limit for one scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub user_id: UserId,

    pub scope: ScopeId,

    /// Maximum spend before the scope is in Alert
    pub limit: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(user_id: UserId, scope: ScopeId, limit: f64) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            scope,
            limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the limit
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.scope, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    NonPositiveLimit(f64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be a positive number, got {}", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
