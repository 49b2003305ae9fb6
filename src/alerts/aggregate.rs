//! Category aggregation
//!
//! Sums expense values per category. Records with a value that is not a
//! finite number are skipped and counted; one bad record never prevents
//! totals for the rest.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Expense, ScopeId};

/// Anything that can be summed into a category total
pub trait SpendRecord {
    /// Category label, `None` or empty when uncategorized
    fn category(&self) -> Option<&str>;

    /// Amount as a finite number, `None` when it cannot be read as one
    fn amount(&self) -> Option<f64>;
}

impl SpendRecord for Expense {
    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn amount(&self) -> Option<f64> {
        Some(self.value).filter(|v| v.is_finite())
    }
}

/// An expense as handed over by an untyped collaborator (imported JSON)
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpense {
    pub category: Option<String>,
    pub value: Value,
}

impl RawExpense {
    pub fn new(category: Option<&str>, value: Value) -> Self {
        Self {
            category: category.map(str::to_string),
            value,
        }
    }
}

impl SpendRecord for RawExpense {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn amount(&self) -> Option<f64> {
        coerce_amount(&self.value)
    }
}

/// Read a JSON value as a finite number; numeric strings are accepted
pub fn coerce_amount(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Per-category totals plus the number of records that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<String, f64>,
    skipped: usize,
}

impl CategoryTotals {
    /// Total for one category label, 0 when nothing was spent
    pub fn get(&self, category: &str) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    /// Spend for a budget scope: one category, or everything for overall
    pub fn spent_in(&self, scope: ScopeId) -> f64 {
        match scope {
            ScopeId::Overall => self.total(),
            ScopeId::Category(category) => self.get(category.as_str()),
        }
    }

    /// Sum across all categories
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Number of records excluded because their value was not a number
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.totals
    }
}

/// Group records by category and sum their values
pub fn aggregate_by_category<'a, R, I>(records: I) -> CategoryTotals
where
    R: SpendRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut result = CategoryTotals::default();

    for (index, record) in records.into_iter().enumerate() {
        let category = record
            .category()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(Category::FALLBACK);

        match record.amount() {
            Some(amount) => {
                *result.totals.entry(category.to_string()).or_insert(0.0) += amount;
            }
            None => {
                tracing::warn!(index, category, "Skipping expense with non-numeric value");
                result.skipped += 1;
            }
        }
    }

    result
}

/// Aggregate an untyped JSON document.
///
/// The document must be an array; anything else is `InvalidInput`. Array
/// elements that are not objects are skipped like unreadable values.
pub fn aggregate_json(document: &Value) -> TrackerResult<CategoryTotals> {
    let items = document.as_array().ok_or_else(|| {
        TrackerError::InvalidInput(format!(
            "expenses must be a list, got {}",
            json_kind(document)
        ))
    })?;

    let mut malformed = 0;
    let records: Vec<RawExpense> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(obj) => Some(RawExpense::new(
                obj.get("category").and_then(Value::as_str),
                obj.get("value").cloned().unwrap_or(Value::Null),
            )),
            None => {
                tracing::warn!(index, "Skipping expense record that is not an object");
                malformed += 1;
                None
            }
        })
        .collect();

    let mut totals = aggregate_by_category(&records);
    totals.skipped += malformed;
    Ok(totals)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
