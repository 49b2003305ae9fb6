//! Spending analytics
//!
//! Totals per category, per day and per month for a set of expenses.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::alerts::{aggregate_by_category, CategoryTotals};
use crate::models::{format_amount, Expense, Month};

/// Spending rolled up three ways
#[derive(Debug, Clone, Default)]
pub struct SpendingAnalytics {
    pub by_category: CategoryTotals,
    pub by_day: BTreeMap<NaiveDate, f64>,
    pub by_month: BTreeMap<Month, f64>,
    pub expense_count: usize,
}

impl SpendingAnalytics {
    pub fn generate(expenses: &[Expense]) -> Self {
        let mut by_day = BTreeMap::new();
        let mut by_month = BTreeMap::new();

        for expense in expenses {
            *by_day.entry(expense.date).or_insert(0.0) += expense.value;
            *by_month.entry(Month::of(expense.date)).or_insert(0.0) += expense.value;
        }

        Self {
            by_category: aggregate_by_category(expenses.iter()),
            by_day,
            by_month,
            expense_count: expenses.len(),
        }
    }

    pub fn total(&self) -> f64 {
        self.by_category.total()
    }

    /// Mean spend over the days that have any spending
    pub fn average_per_active_day(&self) -> f64 {
        if self.by_day.is_empty() {
            0.0
        } else {
            self.total() / self.by_day.len() as f64
        }
    }

    /// The single most expensive day
    pub fn peak_day(&self) -> Option<(NaiveDate, f64)> {
        self.by_day
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(date, amount)| (*date, *amount))
    }

    /// Format for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.expense_count == 0 {
            return "No expenses recorded.".to_string();
        }

        let mut output = String::new();
        output.push_str("Spending Analytics\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "Total: {} across {} expenses\n",
            format_amount(symbol, self.total()),
            self.expense_count
        ));
        if let Some((date, amount)) = self.peak_day() {
            output.push_str(&format!(
                "Peak day: {} ({})\n",
                date,
                format_amount(symbol, amount)
            ));
        }
        output.push_str(&format!(
            "Average per active day: {}\n",
            format_amount(symbol, self.average_per_active_day())
        ));

        output.push_str("\nBy category\n");
        for (category, amount) in self.by_category.iter() {
            output.push_str(&format!("  {:<16} {:>12}\n", category, format_amount(symbol, amount)));
        }

        output.push_str("\nBy month\n");
        for (month, amount) in &self.by_month {
            output.push_str(&format!("  {:<16} {:>12}\n", month, format_amount(symbol, *amount)));
        }

        output.push_str("\nBy day\n");
        for (date, amount) in &self.by_day {
            output.push_str(&format!("  {:<16} {:>12}\n", date, format_amount(symbol, *amount)));
        }

        output
    }
}
