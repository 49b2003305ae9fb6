//! Monthly Report
//!
//! Total spending against the overall budget, with a per-category breakdown.
//! Without a month filter the report covers every expense on record.

use chrono::{DateTime, Utc};

use crate::alerts::aggregate_by_category;
use crate::error::TrackerResult;
use crate::models::{format_amount, Category, Month, ScopeId, UserId};
use crate::storage::Storage;

/// One category line in the report
#[derive(Debug, Clone)]
pub struct CategoryLine {
    pub category: String,
    pub amount: f64,
    /// Share of total spending
    pub percentage: f64,
}

/// Monthly Report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    /// Month covered, `None` for all time
    pub month: Option<Month>,
    pub total_spent: f64,
    /// Overall budget limit, if one is set
    pub budget: Option<f64>,
    /// Budget minus spending; negative when over
    pub remaining: Option<f64>,
    pub expense_count: usize,
    /// Largest category first
    pub categories: Vec<CategoryLine>,
    pub generated_at: DateTime<Utc>,
}

impl MonthlyReport {
    /// Generate the report for a user
    pub fn generate(storage: &Storage, user_id: &UserId, month: Option<Month>) -> TrackerResult<Self> {
        let expenses: Vec<_> = storage
            .expenses
            .list_for_user(user_id, None)?
            .into_iter()
            .filter(|e| month.map_or(true, |m| m.contains(e.date)))
            .collect();

        let totals = aggregate_by_category(expenses.iter());
        let total_spent = totals.total();

        let mut categories: Vec<_> = totals
            .iter()
            .map(|(category, amount)| CategoryLine {
                category: category.to_string(),
                amount,
                percentage: if total_spent > 0.0 {
                    amount / total_spent * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let budget = storage
            .budgets
            .get(user_id, ScopeId::Overall)?
            .map(|b| b.limit);

        Ok(Self {
            month,
            total_spent,
            budget,
            remaining: budget.map(|limit| limit - total_spent),
            expense_count: expenses.len(),
            categories,
            generated_at: Utc::now(),
        })
    }

    /// Amount spent in one category
    pub fn spent_in(&self, category: Category) -> f64 {
        self.categories
            .iter()
            .find(|line| line.category == category.as_str())
            .map_or(0.0, |line| line.amount)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        let title = match self.month {
            Some(month) => format!("Monthly Report: {} {}", month.name(), month.year()),
            None => "Monthly Report: all time".to_string(),
        };
        output.push_str(&title);
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "Total Spent: {}\n",
            format_amount(symbol, self.total_spent)
        ));
        match (self.budget, self.remaining) {
            (Some(budget), Some(remaining)) => {
                output.push_str(&format!("Budget:      {}\n", format_amount(symbol, budget)));
                output.push_str(&format!("Remaining:   {}\n", format_amount(symbol, remaining)));
            }
            _ => output.push_str("Budget:      not set\n"),
        }
        output.push_str(&format!("Expenses:    {}\n\n", self.expense_count));

        if self.categories.is_empty() {
            output.push_str("No expenses recorded.\n");
        } else {
            output.push_str(&format!("{:<20} {:>14} {:>8}\n", "Category", "Amount", "%"));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for line in &self.categories {
                output.push_str(&format!(
                    "{:<20} {:>14} {:>7.1}%\n",
                    line.category,
                    format_amount(symbol, line.amount),
                    line.percentage
                ));
            }
        }

        output.push_str(&format!(
            "\nGenerated {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerPaths;
    use crate::models::{Budget, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, user: &UserId, value: f64, category: Category, y: i32, m: u32, d: u32) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        storage
            .expenses
            .upsert(Expense::new(user.clone(), "item", value, date, category))
            .unwrap();
    }

    #[test]
    fn test_generate_with_month_filter() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new("alice");

        add(&storage, &user, 300.0, Category::Food, 2025, 1, 10);
        add(&storage, &user, 100.0, Category::Transport, 2025, 1, 12);
        add(&storage, &user, 999.0, Category::Food, 2025, 2, 1);
        storage
            .budgets
            .upsert(Budget::new(user.clone(), ScopeId::Overall, 1000.0))
            .unwrap();

        let report = MonthlyReport::generate(&storage, &user, Month::new(2025, 1)).unwrap();
        assert_eq!(report.total_spent, 400.0);
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.budget, Some(1000.0));
        assert_eq!(report.remaining, Some(600.0));
        assert_eq!(report.categories[0].category, "food");
        assert_eq!(report.categories[0].percentage, 75.0);
        assert_eq!(report.spent_in(Category::Transport), 100.0);
    }

    #[test]
    fn test_all_time_without_budget() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new("alice");

        add(&storage, &user, 50.0, Category::Other, 2024, 12, 31);
        add(&storage, &user, 50.0, Category::Other, 2025, 1, 1);

        let report = MonthlyReport::generate(&storage, &user, None).unwrap();
        assert_eq!(report.total_spent, 100.0);
        assert!(report.budget.is_none());

        let text = report.format_terminal("$");
        assert!(text.contains("all time"));
        assert!(text.contains("not set"));
    }

    #[test]
    fn test_format_terminal_over_budget() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new("alice");

        add(&storage, &user, 150.0, Category::Food, 2025, 3, 5);
        storage
            .budgets
            .upsert(Budget::new(user.clone(), ScopeId::Overall, 100.0))
            .unwrap();

        let report = MonthlyReport::generate(&storage, &user, Month::new(2025, 3)).unwrap();
        let text = report.format_terminal("$");
        assert!(text.contains("Monthly Report: March 2025"));
        assert!(text.contains("Remaining:   -$50"));
    }
}
