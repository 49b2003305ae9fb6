//! Budget monitor
//!
//! The event-driven pipeline that runs after every expense or budget change:
//! aggregate the user's spend, evaluate each affected scope, advance its
//! notification state, persist, then hand new notifications to the
//! dispatcher.

use crate::alerts::{
    aggregate_by_category, evaluate, AnnouncedTier, BudgetNotification, ThresholdStatus,
};
use crate::config::Settings;
use crate::dispatch::{DispatchReport, Dispatcher};
use crate::error::TrackerResult;
use crate::models::{Category, ScopeId, UserId};
use crate::storage::Storage;

/// Evaluated state of one budgeted scope
#[derive(Debug, Clone)]
pub struct ScopeReport {
    pub scope: ScopeId,
    pub spent: f64,
    pub limit: f64,
    pub status: ThresholdStatus,
    pub last_announced: AnnouncedTier,
}

/// What a recheck decided and delivered
#[derive(Debug, Clone, Default)]
pub struct RecheckOutcome {
    /// Budgeted scopes that were evaluated
    pub evaluated: usize,
    pub notifications: Vec<BudgetNotification>,
    pub dispatch: DispatchReport,
}

impl RecheckOutcome {
    pub fn fired(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Runs threshold checks for a user's budgets
pub struct BudgetMonitor<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    dispatcher: &'a Dispatcher,
}

impl<'a> BudgetMonitor<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, dispatcher: &'a Dispatcher) -> Self {
        Self {
            storage,
            settings,
            dispatcher,
        }
    }

    /// Recheck after expenses in `categories` changed: those category
    /// scopes plus the overall scope
    pub fn on_expenses_changed(
        &self,
        user_id: &UserId,
        categories: &[Category],
    ) -> TrackerResult<RecheckOutcome> {
        let mut scopes = vec![ScopeId::Overall];
        scopes.extend(categories.iter().map(|&c| ScopeId::Category(c)));
        self.recheck(user_id, &scopes)
    }

    /// Recheck every scope the user has a budget for
    pub fn recheck_all(&self, user_id: &UserId) -> TrackerResult<RecheckOutcome> {
        let scopes: Vec<_> = self
            .storage
            .budgets
            .list_for_user(user_id)?
            .into_iter()
            .map(|b| b.scope)
            .collect();
        self.recheck(user_id, &scopes)
    }

    /// Evaluate the given scopes and advance their notification state.
    ///
    /// Scopes without a budget are skipped. The spend snapshot is taken
    /// inside the notification transaction so two rechecks for the same user
    /// apply in order. Delivery happens after the state is saved.
    pub fn recheck(&self, user_id: &UserId, scopes: &[ScopeId]) -> TrackerResult<RecheckOutcome> {
        self.run(user_id, scopes, false)
    }

    /// Forget what was announced for `scope` and evaluate it again, both in
    /// one transaction. Used when the scope's limit changes.
    pub fn recheck_with_reset(
        &self,
        user_id: &UserId,
        scope: ScopeId,
    ) -> TrackerResult<RecheckOutcome> {
        self.run(user_id, &[scope], true)
    }

    fn run(
        &self,
        user_id: &UserId,
        scopes: &[ScopeId],
        reset: bool,
    ) -> TrackerResult<RecheckOutcome> {
        let mut scopes = scopes.to_vec();
        scopes.sort();
        scopes.dedup();

        let mut targets = Vec::with_capacity(scopes.len());
        for scope in scopes {
            if let Some(budget) = self.storage.budgets.get(user_id, scope)? {
                targets.push((scope, budget.limit));
            }
        }

        if targets.is_empty() {
            return Ok(RecheckOutcome::default());
        }

        let symbol = self.settings.currency_symbol.as_str();
        let notifications = self.storage.notifications.transact(user_id, |log| {
            let expenses = self.storage.expenses.list_for_user(user_id, None)?;
            let totals = aggregate_by_category(expenses.iter());

            let fired: Vec<_> = targets
                .iter()
                .filter_map(|&(scope, limit)| {
                    if reset {
                        log.reset(scope);
                    }
                    let spent = totals.spent_in(scope);
                    let status = evaluate(spent, limit);
                    log.record(scope, status.tier)?;
                    BudgetNotification::build(user_id, scope, spent, limit, &status, symbol)
                })
                .collect();
            TrackerResult::Ok(fired)
        })??;

        self.storage.notifications.save()?;

        for notification in &notifications {
            tracing::info!(
                user = %user_id,
                scope = %notification.scope_id,
                kind = %notification.kind,
                "Budget threshold crossed"
            );
        }

        let dispatch = self.dispatcher.dispatch(&notifications);

        Ok(RecheckOutcome {
            evaluated: targets.len(),
            notifications,
            dispatch,
        })
    }

    /// Read-only view of every budgeted scope; never changes state
    pub fn status(&self, user_id: &UserId) -> TrackerResult<Vec<ScopeReport>> {
        let budgets = self.storage.budgets.list_for_user(user_id)?;
        let expenses = self.storage.expenses.list_for_user(user_id, None)?;
        let totals = aggregate_by_category(expenses.iter());
        let log = self.storage.notifications.log_for(user_id)?;

        Ok(budgets
            .into_iter()
            .map(|budget| {
                let spent = totals.spent_in(budget.scope);
                ScopeReport {
                    scope: budget.scope,
                    spent,
                    limit: budget.limit,
                    status: evaluate(spent, budget.limit),
                    last_announced: log.last_announced(budget.scope),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{NotificationKind, Tier};
    use crate::config::TrackerPaths;
    use crate::models::{Budget, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const FOOD: ScopeId = ScopeId::Category(Category::Food);

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_expense(storage: &Storage, user: &UserId, value: f64, category: Category) {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        storage
            .expenses
            .upsert(Expense::new(user.clone(), "item", value, date, category))
            .unwrap();
    }

    #[test]
    fn test_food_budget_end_to_end() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 5000.0)).unwrap();
        add_expense(&storage, &user, 4000.0, Category::Food);
        add_expense(&storage, &user, 1000.0, Category::Food);

        let outcome = monitor.on_expenses_changed(&user, &[Category::Food]).unwrap();
        assert_eq!(outcome.evaluated, 1);
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.notifications[0].kind, NotificationKind::Alert);
        assert_eq!(outcome.notifications[0].scope_id, FOOD);

        // Same totals again: already announced
        let again = monitor.on_expenses_changed(&user, &[Category::Food]).unwrap();
        assert!(!again.fired());
    }

    #[test]
    fn test_scopes_without_budget_are_skipped() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        add_expense(&storage, &user, 100.0, Category::Food);
        let outcome = monitor.on_expenses_changed(&user, &[Category::Food]).unwrap();
        assert_eq!(outcome.evaluated, 0);
        assert!(storage.notifications.log_for(&user).unwrap().is_empty());
    }

    #[test]
    fn test_overall_warning_then_escalation() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage
            .budgets
            .upsert(Budget::new(user.clone(), ScopeId::Overall, 1000.0))
            .unwrap();

        add_expense(&storage, &user, 500.0, Category::Food);
        assert!(!monitor.on_expenses_changed(&user, &[Category::Food]).unwrap().fired());

        add_expense(&storage, &user, 350.0, Category::Transport);
        let warning = monitor.on_expenses_changed(&user, &[Category::Transport]).unwrap();
        assert_eq!(warning.notifications[0].kind, NotificationKind::Warning);

        add_expense(&storage, &user, 10.0, Category::Transport);
        assert!(!monitor.on_expenses_changed(&user, &[Category::Transport]).unwrap().fired());

        add_expense(&storage, &user, 200.0, Category::Other);
        let alert = monitor.on_expenses_changed(&user, &[Category::Other]).unwrap();
        assert_eq!(alert.notifications[0].kind, NotificationKind::Alert);
        assert_eq!(
            storage.notifications.last_announced(&user, ScopeId::Overall).unwrap(),
            AnnouncedTier::Alert
        );
    }

    #[test]
    fn test_status_is_read_only() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 100.0)).unwrap();
        add_expense(&storage, &user, 90.0, Category::Food);

        let reports = monitor.status(&user).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status.tier, Tier::Warning);
        assert_eq!(reports[0].last_announced, AnnouncedTier::None);

        // Viewing status must not consume the announcement
        let outcome = monitor.recheck_all(&user).unwrap();
        assert!(outcome.fired());
    }

    #[test]
    fn test_reset_announces_current_tier_again() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 100.0)).unwrap();
        add_expense(&storage, &user, 120.0, Category::Food);
        assert!(monitor.recheck_all(&user).unwrap().fired());
        assert!(!monitor.recheck(&user, &[FOOD]).unwrap().fired());

        let outcome = monitor.recheck_with_reset(&user, FOOD).unwrap();
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.notifications[0].kind, NotificationKind::Alert);
        assert_eq!(
            storage.notifications.last_announced(&user, FOOD).unwrap(),
            AnnouncedTier::Alert
        );
    }

    #[test]
    fn test_reset_below_threshold_leaves_scope_quiet() {
        let (_temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 100.0)).unwrap();
        add_expense(&storage, &user, 90.0, Category::Food);
        assert!(monitor.recheck_all(&user).unwrap().fired());

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 1000.0)).unwrap();
        assert!(!monitor.recheck_with_reset(&user, FOOD).unwrap().fired());
        assert_eq!(
            storage.notifications.last_announced(&user, FOOD).unwrap(),
            AnnouncedTier::None
        );
    }

    #[test]
    fn test_state_is_persisted() {
        let (temp, storage) = setup();
        let settings = Settings::default();
        let dispatcher = Dispatcher::new();
        let monitor = BudgetMonitor::new(&storage, &settings, &dispatcher);
        let user = UserId::new("alice");

        storage.budgets.upsert(Budget::new(user.clone(), FOOD, 100.0)).unwrap();
        add_expense(&storage, &user, 100.0, Category::Food);
        monitor.recheck_all(&user).unwrap();

        let paths = TrackerPaths::with_base_dir(temp.path().to_path_buf());
        let reloaded = crate::storage::NotificationRepository::new(paths.notifications_file());
        reloaded.load().unwrap();
        assert_eq!(reloaded.last_announced(&user, FOOD).unwrap(), AnnouncedTier::Alert);
    }
}
