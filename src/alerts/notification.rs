//! User-facing notification records
//!
//! Built when the dedup state machine decides a crossing must be announced,
//! then handed to the dispatcher sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::threshold::{ThresholdStatus, Tier};
use crate::models::{format_amount, ScopeId, UserId};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Warning,
    Alert,
}

impl NotificationKind {
    /// Kind for a tier; Normal is never announced
    pub fn for_tier(tier: Tier) -> Option<Self> {
        match tier {
            Tier::Normal => None,
            Tier::Warning => Some(Self::Warning),
            Tier::Alert => Some(Self::Alert),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

/// A budget threshold crossing to surface to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub user_id: UserId,
    pub scope_id: ScopeId,
    pub title: String,
    pub message: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage_used: f64,
    pub created_at: DateTime<Utc>,
}

impl BudgetNotification {
    /// Build the notification for a scope that just entered `status.tier`.
    ///
    /// Returns `None` for Normal.
    pub fn build(
        user_id: &UserId,
        scope_id: ScopeId,
        spent: f64,
        limit: f64,
        status: &ThresholdStatus,
        currency_symbol: &str,
    ) -> Option<Self> {
        let kind = NotificationKind::for_tier(status.tier)?;
        let pct = status.percentage_used;
        let spent_str = format_amount(currency_symbol, spent);
        let limit_str = format_amount(currency_symbol, limit);

        let (title, message) = match (scope_id, kind) {
            (ScopeId::Overall, NotificationKind::Alert) => (
                "Budget Alert",
                format!("You've exceeded your budget limit of {}", limit_str),
            ),
            (ScopeId::Overall, NotificationKind::Warning) => (
                "Budget Warning",
                format!("You've used {:.0}% of your budget", pct),
            ),
            (ScopeId::Category(category), NotificationKind::Alert) => (
                "Category Budget Alert",
                format!(
                    "{} expenses ({}) have exceeded the budget limit of {}",
                    category, spent_str, limit_str
                ),
            ),
            (ScopeId::Category(category), NotificationKind::Warning) => (
                "Category Budget Warning",
                format!(
                    "{} expenses ({}) are at {:.1}% of budget limit",
                    category, spent_str, pct
                ),
            ),
        };

        Some(Self {
            kind,
            user_id: user_id.clone(),
            scope_id,
            title: title.to_string(),
            message,
            spent,
            limit,
            percentage_used: pct,
            created_at: Utc::now(),
        })
    }
}

impl fmt::Display for BudgetNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.title, self.message)
    }
}
