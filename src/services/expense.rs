//! Expense service
//!
//! Create, read, update and delete expenses. Every change is saved and then
//! reported to the budget monitor once.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Expense, ExpenseId, ExpensePatch, UserId};
use crate::services::monitor::{BudgetMonitor, RecheckOutcome};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub label: String,
    pub value: f64,
    pub date: NaiveDate,
    pub category: Category,
}

/// Result of a change: the affected expenses and any alerts it raised
#[derive(Debug, Clone)]
pub struct ExpenseChange {
    pub expenses: Vec<Expense>,
    pub alerts: RecheckOutcome,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    monitor: &'a BudgetMonitor<'a>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, monitor: &'a BudgetMonitor<'a>) -> Self {
        Self { storage, monitor }
    }

    /// Log a new expense
    pub fn add(&self, user_id: &UserId, input: NewExpense) -> TrackerResult<ExpenseChange> {
        let expense = Expense::new(
            user_id.clone(),
            input.label,
            input.value,
            input.date,
            input.category,
        );

        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        tracing::debug!(user = %user_id, id = %expense.id, value = expense.value, "Expense added");

        let alerts = self
            .monitor
            .on_expenses_changed(user_id, &[expense.category])?;

        Ok(ExpenseChange {
            expenses: vec![expense],
            alerts,
        })
    }

    /// List a user's expenses, newest first
    pub fn list(&self, user_id: &UserId, category: Option<Category>) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.list_for_user(user_id, category)
    }

    /// Find one of the user's expenses by full ID or short reference
    /// ("exp-1a2b3c4d" or a UUID prefix)
    pub fn find(&self, user_id: &UserId, reference: &str) -> TrackerResult<Expense> {
        if let Ok(id) = reference.parse::<ExpenseId>() {
            return self
                .storage
                .expenses
                .get(id)?
                .filter(|e| &e.user_id == user_id)
                .ok_or_else(|| TrackerError::expense_not_found(reference));
        }

        let mut matches: Vec<_> = self
            .list(user_id, None)?
            .into_iter()
            .filter(|e| e.id.matches_short(reference))
            .collect();

        match matches.len() {
            0 => Err(TrackerError::expense_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(TrackerError::Validation(format!(
                "Reference '{}' is ambiguous ({} expenses match)",
                reference, n
            ))),
        }
    }

    /// Apply a partial update to an expense
    pub fn update(
        &self,
        user_id: &UserId,
        reference: &str,
        patch: ExpensePatch,
    ) -> TrackerResult<ExpenseChange> {
        if patch.is_empty() {
            return Err(TrackerError::Validation("Nothing to update".into()));
        }

        let mut expense = self.find(user_id, reference)?;
        let touched = expense.apply(patch);

        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        let alerts = self.monitor.on_expenses_changed(user_id, &touched)?;

        Ok(ExpenseChange {
            expenses: vec![expense],
            alerts,
        })
    }

    /// Delete one or more expenses. All references are resolved before
    /// anything is deleted.
    pub fn delete(&self, user_id: &UserId, references: &[String]) -> TrackerResult<ExpenseChange> {
        if references.is_empty() {
            return Err(TrackerError::Validation(
                "Provide at least one expense to delete".into(),
            ));
        }

        let targets = references
            .iter()
            .map(|r| self.find(user_id, r))
            .collect::<TrackerResult<Vec<_>>>()?;

        let mut removed = Vec::with_capacity(targets.len());
        for expense in targets {
            if let Some(expense) = self.storage.expenses.delete(expense.id)? {
                removed.push(expense);
            }
        }
        self.storage.expenses.save()?;

        let alerts = self.recheck_after_removal(user_id, &removed)?;

        Ok(ExpenseChange {
            expenses: removed,
            alerts,
        })
    }

    /// Delete every expense the user owns
    pub fn clear(&self, user_id: &UserId) -> TrackerResult<ExpenseChange> {
        let removed = self.storage.expenses.delete_all_for_user(user_id)?;
        self.storage.expenses.save()?;

        let alerts = self.recheck_after_removal(user_id, &removed)?;

        Ok(ExpenseChange {
            expenses: removed,
            alerts,
        })
    }

    fn recheck_after_removal(
        &self,
        user_id: &UserId,
        removed: &[Expense],
    ) -> TrackerResult<RecheckOutcome> {
        if removed.is_empty() {
            return Ok(RecheckOutcome::default());
        }
        let mut categories: Vec<_> = removed.iter().map(|e| e.category).collect();
        categories.sort();
        categories.dedup();
        self.monitor.on_expenses_changed(user_id, &categories)
    }
}
