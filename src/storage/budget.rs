//! Budget limit repository for JSON storage
//!
//! Manages loading and saving budget limits to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Budget, ScopeId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budget limits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub user_id: UserId,
    pub scope: ScopeId,
}

impl BudgetKey {
    pub fn new(user_id: UserId, scope: ScopeId) -> Self {
        Self { user_id, scope }
    }
}

/// Repository for budget limit persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            let key = BudgetKey::new(budget.user_id.clone(), budget.scope);
            budgets.insert(key, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.scope.cmp(&b.scope)));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get the budget for a user's scope
    pub fn get(&self, user_id: &UserId, scope: ScopeId) -> Result<Option<Budget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&BudgetKey::new(user_id.clone(), scope)).cloned())
    }

    /// Limit for a user's scope, 0 (unconstrained) when none is set
    pub fn limit_for(&self, user_id: &UserId, scope: ScopeId) -> Result<f64, TrackerError> {
        Ok(self.get(user_id, scope)?.map(|b| b.limit).unwrap_or(0.0))
    }

    /// All budgets for a user, overall first then categories
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Budget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| &b.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|b| b.scope);
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = BudgetKey::new(budget.user_id.clone(), budget.scope);
        budgets.insert(key, budget);
        Ok(())
    }

    /// Delete a budget, returning it if it existed
    pub fn delete(&self, user_id: &UserId, scope: ScopeId) -> Result<Option<Budget>, TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&BudgetKey::new(user_id.clone(), scope)))
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }
}
