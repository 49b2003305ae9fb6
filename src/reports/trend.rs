//! Spending trend insights
//!
//! Compares this month's spend in a category with the average monthly spend
//! in that category over earlier months.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Category, Expense, Month};

/// Minimum change, in percent, worth reporting
pub const TREND_THRESHOLD_PERCENT: f64 = 15.0;

/// Direction of a reported change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Spending rose
    Warning,
    /// Spending fell
    Praise,
}

/// A notable month-over-history change
#[derive(Debug, Clone, Serialize)]
pub struct TrendInsight {
    pub category: Category,
    pub kind: InsightKind,
    /// Signed change against the historical average
    pub change_percent: f64,
    pub current: f64,
    pub average: f64,
    pub message: String,
}

/// Compare `month`'s spend in `category` against prior months.
///
/// The average is taken over every earlier month in which the user spent
/// anything. Returns `None` with no history, a zero baseline, or a change
/// under the threshold.
pub fn analyze(expenses: &[Expense], category: Category, month: Month) -> Option<TrendInsight> {
    let history_months: BTreeSet<Month> = expenses
        .iter()
        .map(|e| Month::of(e.date))
        .filter(|m| *m < month)
        .collect();

    if history_months.is_empty() {
        return None;
    }

    let in_category = expenses.iter().filter(|e| e.category == category);
    let (current, history): (Vec<_>, Vec<_>) = in_category
        .filter(|e| Month::of(e.date) <= month)
        .partition(|e| month.contains(e.date));

    let current: f64 = current.iter().map(|e| e.value).sum();
    let average = history.iter().map(|e| e.value).sum::<f64>() / history_months.len() as f64;

    if average <= 0.0 {
        return None;
    }

    let change_percent = (current - average) / average * 100.0;
    if change_percent.abs() < TREND_THRESHOLD_PERCENT {
        return None;
    }

    let (kind, message) = if change_percent > 0.0 {
        (
            InsightKind::Warning,
            format!(
                "You spent {:.1}% more on {} than usual this month. Consider reducing expenses next month.",
                change_percent.abs(),
                category
            ),
        )
    } else {
        (
            InsightKind::Praise,
            format!(
                "You spent {:.1}% less on {} than usual this month. Great job saving!",
                change_percent.abs(),
                category
            ),
        )
    };

    Some(TrendInsight {
        category,
        kind,
        change_percent,
        current,
        average,
        message,
    })
}

/// Insights for every category
pub fn analyze_all(expenses: &[Expense], month: Month) -> Vec<TrendInsight> {
    Category::all()
        .iter()
        .filter_map(|&category| analyze(expenses, category, month))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn expense(value: f64, category: Category, m: u32) -> Expense {
        Expense::new(
            UserId::new("alice"),
            "item",
            value,
            NaiveDate::from_ymd_opt(2025, m, 10).unwrap(),
            category,
        )
    }

    fn march() -> Month {
        Month::new(2025, 3).unwrap()
    }

    #[test]
    fn test_no_history() {
        let expenses = vec![expense(100.0, Category::Food, 3)];
        assert!(analyze(&expenses, Category::Food, march()).is_none());
    }

    #[test]
    fn test_spending_more() {
        let expenses = vec![
            expense(100.0, Category::Food, 1),
            expense(100.0, Category::Food, 2),
            expense(130.0, Category::Food, 3),
        ];
        let insight = analyze(&expenses, Category::Food, march()).unwrap();
        assert_eq!(insight.kind, InsightKind::Warning);
        assert_eq!(insight.average, 100.0);
        assert!((insight.change_percent - 30.0).abs() < 1e-9);
        assert_eq!(
            insight.message,
            "You spent 30.0% more on food than usual this month. Consider reducing expenses next month."
        );
    }

    #[test]
    fn test_spending_less() {
        let expenses = vec![
            expense(200.0, Category::Transport, 1),
            expense(100.0, Category::Transport, 3),
        ];
        let insight = analyze(&expenses, Category::Transport, march()).unwrap();
        assert_eq!(insight.kind, InsightKind::Praise);
        assert!(insight.message.contains("50.0% less on transport"));
    }

    #[test]
    fn test_small_change_ignored() {
        let expenses = vec![
            expense(100.0, Category::Food, 2),
            expense(110.0, Category::Food, 3),
        ];
        assert!(analyze(&expenses, Category::Food, march()).is_none());
    }

    #[test]
    fn test_average_uses_months_with_any_spending() {
        // Two history months, only one with food: average 50
        let expenses = vec![
            expense(100.0, Category::Food, 1),
            expense(30.0, Category::Transport, 2),
            expense(100.0, Category::Food, 3),
        ];
        let insight = analyze(&expenses, Category::Food, march()).unwrap();
        assert_eq!(insight.average, 50.0);
        assert_eq!(insight.kind, InsightKind::Warning);
    }

    #[test]
    fn test_later_months_are_excluded() {
        let expenses = vec![
            expense(100.0, Category::Food, 1),
            expense(100.0, Category::Food, 2),
            expense(500.0, Category::Food, 4),
        ];
        let insight = analyze(&expenses, Category::Food, Month::new(2025, 2).unwrap());
        assert!(insight.is_none());
    }

    #[test]
    fn test_analyze_all() {
        let expenses = vec![
            expense(100.0, Category::Food, 1),
            expense(100.0, Category::Utilities, 1),
            expense(200.0, Category::Food, 3),
            expense(100.0, Category::Utilities, 3),
        ];
        let insights = analyze_all(&expenses, march());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, Category::Food);
    }
}
