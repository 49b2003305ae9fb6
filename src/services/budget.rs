//! Budget service
//!
//! Setting and removing spending limits. A changed limit starts the scope's
//! notification history over and rechecks it against current spending in one
//! step. Setting the same limit again only rechecks.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, ScopeId, UserId};
use crate::services::monitor::{BudgetMonitor, RecheckOutcome};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    monitor: &'a BudgetMonitor<'a>,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage, monitor: &'a BudgetMonitor<'a>) -> Self {
        Self { storage, monitor }
    }

    /// Create or replace the limit for a scope
    pub fn set(
        &self,
        user_id: &UserId,
        scope: ScopeId,
        limit: f64,
    ) -> TrackerResult<(Budget, RecheckOutcome)> {
        let existing = self.storage.budgets.get(user_id, scope)?;
        let changed = existing.as_ref().map_or(true, |b| b.limit != limit);
        let budget = match existing {
            Some(mut existing) => {
                existing.set_limit(limit);
                existing
            }
            None => Budget::new(user_id.clone(), scope, limit),
        };

        budget
            .validate()
            .map_err(|e| TrackerError::Budget(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        tracing::debug!(user = %user_id, scope = %scope, limit, changed, "Budget set");

        let outcome = if changed {
            self.monitor.recheck_with_reset(user_id, scope)?
        } else {
            self.monitor.recheck(user_id, &[scope])?
        };
        Ok((budget, outcome))
    }

    /// Remove the limit for a scope along with its notification state
    pub fn remove(&self, user_id: &UserId, scope: ScopeId) -> TrackerResult<Budget> {
        let removed = self
            .storage
            .budgets
            .delete(user_id, scope)?
            .ok_or_else(|| TrackerError::budget_not_found(scope.to_string()))?;
        self.storage.budgets.save()?;

        self.storage.notifications.remove_scope(user_id, scope)?;
        self.storage.notifications.save()?;

        tracing::debug!(user = %user_id, scope = %scope, "Budget removed");
        Ok(removed)
    }

    /// All of a user's budgets, overall first
    pub fn list(&self, user_id: &UserId) -> TrackerResult<Vec<Budget>> {
        self.storage.budgets.list_for_user(user_id)
    }

    /// Limit for a scope; 0 when no budget is set
    pub fn limit(&self, user_id: &UserId, scope: ScopeId) -> TrackerResult<f64> {
        self.storage.budgets.limit_for(user_id, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AnnouncedTier, NotificationKind};
    use crate::config::{Settings, TrackerPaths};
    use crate::dispatch::Dispatcher;
    use crate::models::{Category, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const FOOD: ScopeId = ScopeId::Category(Category::Food);

    fn setup() -> (TempDir, Storage, Settings, Dispatcher) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default(), Dispatcher::new())
    }

    fn spend(storage: &Storage, user: &UserId, value: f64) {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        storage
            .expenses
            .upsert(Expense::new(user.clone(), "lunch", value, date, Category::Food))
            .unwrap();
    }

    #[test]
    fn test_set_and_list() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        service.set(&user, FOOD, 500.0).unwrap();
        service.set(&user, ScopeId::Overall, 2000.0).unwrap();

        let budgets = service.list(&user).unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].scope, ScopeId::Overall);
        assert_eq!(service.limit(&user, FOOD).unwrap(), 500.0);
        assert_eq!(service.limit(&user, ScopeId::Category(Category::Transport)).unwrap(), 0.0);
    }

    #[test]
    fn test_set_rejects_non_positive_limit() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);

        for limit in [0.0, -10.0, f64::NAN] {
            let err = service.set(&UserId::new("alice"), FOOD, limit).unwrap_err();
            assert!(matches!(err, TrackerError::Budget(_)));
        }
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_update_keeps_identity() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        let (first, _) = service.set(&user, FOOD, 500.0).unwrap();
        let (second, _) = service.set(&user, FOOD, 800.0).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(storage.budgets.count().unwrap(), 1);
    }

    #[test]
    fn test_set_checks_existing_spend() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        spend(&storage, &user, 450.0);
        let (_, outcome) = service.set(&user, FOOD, 500.0).unwrap();
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.notifications[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn test_changed_limit_announces_again() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        spend(&storage, &user, 600.0);
        let (_, first) = service.set(&user, FOOD, 500.0).unwrap();
        assert_eq!(first.notifications[0].kind, NotificationKind::Alert);

        // Same tier under the new limit, but the history was reset
        let (_, second) = service.set(&user, FOOD, 550.0).unwrap();
        assert_eq!(second.notifications[0].kind, NotificationKind::Alert);
    }

    #[test]
    fn test_same_limit_twice_fires_once() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        spend(&storage, &user, 600.0);
        let (_, first) = service.set(&user, FOOD, 500.0).unwrap();
        assert_eq!(first.notifications.len(), 1);

        let (_, second) = service.set(&user, FOOD, 500.0).unwrap();
        assert!(second.notifications.is_empty());
        assert_eq!(
            storage.notifications.last_announced(&user, FOOD).unwrap(),
            AnnouncedTier::Alert
        );
    }

    #[test]
    fn test_remove_clears_state() {
        let (_temp, storage, settings, dispatcher) = setup();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let service = BudgetService::new(&storage, &monitor);
        let user = UserId::new("alice");

        spend(&storage, &user, 600.0);
        service.set(&user, FOOD, 500.0).unwrap();
        assert_eq!(
            storage.notifications.last_announced(&user, FOOD).unwrap(),
            AnnouncedTier::Alert
        );

        service.remove(&user, FOOD).unwrap();
        assert!(storage.notifications.log_for(&user).unwrap().is_empty());
        assert!(service.remove(&user, FOOD).unwrap_err().is_not_found());
    }
}
