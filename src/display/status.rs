//! Budget status and alert display
//!
//! Table views of budgeted scopes and of delivered notifications.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::alerts::{AnnouncedTier, BudgetNotification, CategoryTotals, Tier};
use crate::models::{format_amount, Budget};
use crate::services::ScopeReport;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Announced")]
    announced: &'static str,
}

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Normal => "ok",
        Tier::Warning => "WARNING",
        Tier::Alert => "OVER",
    }
}

fn announced_label(tier: AnnouncedTier) -> &'static str {
    match tier {
        AnnouncedTier::None => "-",
        AnnouncedTier::Warning => "warning",
        AnnouncedTier::Alert => "alert",
    }
}

/// Render budget status, one row per budgeted scope
pub fn format_status_table(reports: &[ScopeReport], symbol: &str) -> String {
    if reports.is_empty() {
        return "No budgets set. Use `spendwatch budget set` to add one.".to_string();
    }

    let rows = reports.iter().map(|r| StatusRow {
        scope: r.scope.to_string(),
        spent: format_amount(symbol, r.spent),
        limit: format_amount(symbol, r.limit),
        used: format!("{:.1}%", r.status.percentage_used),
        remaining: format_amount(symbol, r.status.remaining),
        status: tier_label(r.status.tier),
        announced: announced_label(r.last_announced),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

/// Render the list of budgets
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        scope: b.scope.to_string(),
        limit: format_amount(symbol, b.limit),
        updated: b.updated_at.format("%Y-%m-%d").to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Render delivered notifications, oldest first
pub fn format_alert_history(notifications: &[BudgetNotification]) -> String {
    if notifications.is_empty() {
        return "No alerts recorded.".to_string();
    }

    let rows = notifications.iter().map(|n| AlertRow {
        when: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        kind: n.kind.to_string(),
        scope: n.scope_id.to_string(),
        message: n.message.clone(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Render per-category totals from an aggregation run
pub fn format_category_totals(totals: &CategoryTotals, symbol: &str) -> String {
    let mut output = if totals.is_empty() {
        "No spending found.".to_string()
    } else {
        let rows = totals.iter().map(|(category, total)| TotalRow {
            category: category.to_string(),
            total: format_amount(symbol, total),
        });
        Table::new(rows).with(Style::sharp()).to_string()
    };

    if totals.skipped() > 0 {
        output.push_str(&format!(
            "\n{} record(s) skipped: value was not a number",
            totals.skipped()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{aggregate_json, evaluate};
    use crate::models::{Category, ScopeId, UserId};
    use serde_json::json;

    #[test]
    fn test_status_table() {
        let report = ScopeReport {
            scope: ScopeId::Category(Category::Food),
            spent: 90.0,
            limit: 100.0,
            status: evaluate(90.0, 100.0),
            last_announced: AnnouncedTier::Warning,
        };
        let table = format_status_table(&[report], "$");
        assert!(table.contains("food"));
        assert!(table.contains("90.0%"));
        assert!(table.contains("WARNING"));
        assert!(table.contains("warning"));
    }

    #[test]
    fn test_empty_views() {
        assert!(format_status_table(&[], "$").starts_with("No budgets set"));
        assert_eq!(format_budget_list(&[], "$"), "No budgets set.");
        assert_eq!(format_alert_history(&[]), "No alerts recorded.");
    }

    #[test]
    fn test_budget_list() {
        let budget = Budget::new(UserId::new("a"), ScopeId::Overall, 5000.0);
        let table = format_budget_list(&[budget], "₹");
        assert!(table.contains("overall"));
        assert!(table.contains("₹5000"));
    }

    #[test]
    fn test_category_totals_reports_skipped() {
        let totals = aggregate_json(&json!([
            {"category": "food", "value": 12},
            {"category": "food", "value": "oops"}
        ]))
        .unwrap();
        let output = format_category_totals(&totals, "$");
        assert!(output.contains("$12"));
        assert!(output.contains("1 record(s) skipped"));
    }
}
