//! Expense categories and budget scopes
//!
//! A scope is what a budget limit applies to: the user's overall spending or
//! a single category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Entertainment,
    #[default]
    Other,
}

impl Category {
    /// Label used for uncategorized spending
    pub const FALLBACK: &'static str = "other";

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Utilities,
            Self::Entertainment,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Other => Self::FALLBACK,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category or scope name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected one of: food, transport, utilities, entertainment, other)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Ok(Self::Other);
        }
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// What a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScopeId {
    /// All spending, regardless of category
    Overall,
    Category(Category),
}

impl ScopeId {
    pub const OVERALL: &'static str = "overall";

    pub fn is_overall(&self) -> bool {
        matches!(self, Self::Overall)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overall => Self::OVERALL,
            Self::Category(category) => category.as_str(),
        }
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for ScopeId {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl FromStr for ScopeId {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // "general" is the older name for the overall budget
            Self::OVERALL | "general" => Ok(Self::Overall),
            "" => Err(UnknownCategory(s.to_string())),
            _ => s.parse().map(Self::Category),
        }
    }
}

impl TryFrom<String> for ScopeId {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScopeId> for String {
    fn from(scope: ScopeId) -> Self {
        scope.as_str().to_string()
    }
}
