//! Expense display formatting
//!
//! Formats expenses for terminal output in list and detail views.

use crate::models::{format_amount, Expense};

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let label_width = expenses
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<12}  {:<label_width$}  {:<13}  {:>12}\n",
        "ID",
        "Date",
        "Label",
        "Category",
        "Amount",
        label_width = label_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<12}  {:-<label_width$}  {:-<13}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        label_width = label_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<12}  {:<label_width$}  {:<13}  {:>12}\n",
            expense.id.to_string(),
            expense.date.format(date_format).to_string(),
            truncate(&expense.label, label_width),
            expense.category.as_str(),
            format_amount(symbol, expense.value),
            label_width = label_width,
        ));
    }

    let total: f64 = expenses.iter().map(|e| e.value).sum();
    output.push_str(&format!(
        "\n{} expense(s), total {}",
        expenses.len(),
        format_amount(symbol, total)
    ));

    output
}

/// Format a single expense for detail view
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Label:    {}\n", expense.label));
    output.push_str(&format!("  Amount:   {}\n", format_amount(symbol, expense.value)));
    output.push_str(&format!("  Category: {}\n", expense.category));
    output.push_str(&format!("  Date:     {}\n", expense.date));
    output.push_str(&format!(
        "  Updated:  {}",
        expense.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "$", "%Y-%m-%d"), "No expenses found.");
    }

    #[test]
    fn test_list_includes_total() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let expenses = vec![
            Expense::new(UserId::new("a"), "Coffee", 3.5, date, Category::Food),
            Expense::new(UserId::new("a"), "Train", 12.0, date, Category::Transport),
        ];
        let output = format_expense_list(&expenses, "$", "%d/%m/%Y");
        assert!(output.contains("05/01/2025"));
        assert!(output.contains("Coffee"));
        assert!(output.contains("2 expense(s), total $15.50"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long label", 8), "a ver...");
    }
}
