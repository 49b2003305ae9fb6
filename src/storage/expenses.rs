//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Category, Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a per-user index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: user_id -> expense_ids
    by_user: RwLock<HashMap<UserId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_user.clear();

        for expense in file_data.expenses {
            by_user
                .entry(expense.user_id.clone())
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// List a user's expenses, newest first, optionally for one category
    pub fn list_for_user(
        &self,
        user_id: &UserId,
        category: Option<Category>,
    ) -> Result<Vec<Expense>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_user.get(user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|e| category.map_or(true, |c| e.category == c))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_user.entry(expense.user_id.clone()).or_default();
        if !ids.contains(&expense.id) {
            ids.push(expense.id);
        }
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_user.get_mut(&expense.user_id) {
                ids.retain(|existing| *existing != id);
            }
        }
        Ok(removed)
    }

    /// Delete every expense owned by a user, returning what was removed
    pub fn delete_all_for_user(&self, user_id: &UserId) -> Result<Vec<Expense>, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_user.remove(user_id).unwrap_or_default();
        Ok(ids.into_iter().filter_map(|id| data.remove(&id)).collect())
    }

    /// Count all expenses
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(user: &str, day: u32, category: Category, value: f64) -> Expense {
        Expense::new(
            UserId::new(user),
            format!("item {}", day),
            value,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_list_for_user_sorted_and_filtered() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(expense("alice", 3, Category::Food, 10.0)).unwrap();
        repo.upsert(expense("alice", 9, Category::Transport, 4.0)).unwrap();
        repo.upsert(expense("alice", 5, Category::Food, 6.0)).unwrap();
        repo.upsert(expense("bob", 1, Category::Food, 99.0)).unwrap();

        let alice = UserId::new("alice");
        let all = repo.list_for_user(&alice, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date.to_string(), "2025-01-09");

        let food = repo.list_for_user(&alice, Some(Category::Food)).unwrap();
        assert_eq!(food.len(), 2);
        assert!(food.iter().all(|e| e.category == Category::Food));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let e = expense("alice", 2, Category::Utilities, 120.0);
        let id = e.id;
        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.value, 120.0);
        assert_eq!(
            repo2.list_for_user(&UserId::new("alice"), None).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_upsert_existing_does_not_duplicate_index() {
        let (_temp_dir, repo) = create_test_repo();
        let mut e = expense("alice", 2, Category::Food, 1.0);
        repo.upsert(e.clone()).unwrap();
        e.value = 2.0;
        repo.upsert(e).unwrap();

        let list = repo.list_for_user(&UserId::new("alice"), None).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].value, 2.0);
    }

    #[test]
    fn test_delete_and_delete_all() {
        let (_temp_dir, repo) = create_test_repo();
        let e1 = expense("alice", 1, Category::Food, 1.0);
        let id1 = e1.id;
        repo.upsert(e1).unwrap();
        repo.upsert(expense("alice", 2, Category::Food, 1.0)).unwrap();
        repo.upsert(expense("bob", 2, Category::Food, 1.0)).unwrap();

        assert!(repo.delete(id1).unwrap().is_some());
        assert!(repo.delete(id1).unwrap().is_none());

        let removed = repo.delete_all_for_user(&UserId::new("alice")).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(repo.count().unwrap(), 1);
    }
}
