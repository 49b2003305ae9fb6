//! CSV Export functionality
//!
//! Writes a spreadsheet-friendly expense report: one row per expense with a
//! running total, followed by summary, category and monthly sections.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, Month};

/// Column headers of the expense rows
pub const EXPENSE_HEADERS: [&str; 7] = [
    "Date",
    "Category",
    "Description",
    "Amount",
    "Running Total",
    "Month",
    "Year",
];

/// Export expenses to CSV, oldest first. Returns the number of expense rows.
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], mut writer: W) -> TrackerResult<usize> {
    if expenses.is_empty() {
        return Err(TrackerError::Export("No expenses to export".into()));
    }

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let mut running_total = 0.0;
    let mut category_totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut monthly_totals: BTreeMap<Month, f64> = BTreeMap::new();

    let rows = section(|wtr| {
        wtr.write_record(EXPENSE_HEADERS)?;
        for expense in &sorted {
            running_total += expense.value;
            *category_totals.entry(expense.category.as_str()).or_insert(0.0) += expense.value;
            let month = Month::of(expense.date);
            *monthly_totals.entry(month).or_insert(0.0) += expense.value;

            wtr.write_record([
                expense.date.to_string(),
                expense.category.to_string(),
                expense.label.clone(),
                format!("{:.2}", expense.value),
                format!("{:.2}", running_total),
                month.name(),
                month.year().to_string(),
            ])?;
        }
        Ok(())
    })?;

    let summary = section(|wtr| {
        wtr.write_record(["Summary"])?;
        wtr.write_record(["Total Expenses".to_string(), format!("{:.2}", running_total)])
    })?;

    let categories = section(|wtr| {
        wtr.write_record(["Category Breakdown"])?;
        for (category, total) in &category_totals {
            wtr.write_record([category.to_string(), format!("{:.2}", total)])?;
        }
        Ok(())
    })?;

    let trends = section(|wtr| {
        wtr.write_record(["Monthly Trends"])?;
        for (month, total) in &monthly_totals {
            wtr.write_record([
                format!("{} {}", month.name(), month.year()),
                format!("{:.2}", total),
            ])?;
        }
        Ok(())
    })?;

    // Sections are separated by one empty line
    let output = [rows, summary, categories, trends].join(&b"\n"[..]);
    writer
        .write_all(&output)
        .and_then(|_| writer.flush())
        .map_err(|e| TrackerError::Export(format!("Failed to write CSV output: {}", e)))?;

    Ok(sorted.len())
}

/// Default file name for an export made today
pub fn default_file_name() -> String {
    format!(
        "expense_report_{}.csv",
        chrono::Local::now().date_naive().format("%Y-%m-%d")
    )
}

/// Write one block of records into an owned buffer
fn section<F>(build: F) -> TrackerResult<Vec<u8>>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    build(&mut wtr)?;
    wtr.into_inner()
        .map_err(|e| TrackerError::Export(format!("Failed to finish CSV section: {}", e.error())))
}
