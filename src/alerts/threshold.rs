//! Threshold evaluation
//!
//! Classifies cumulative spend against a limit. This is the only place the
//! Warning/Alert cutoffs live; every caller (monitor, status view, reports)
//! goes through [`evaluate`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage of the limit at which a scope enters Warning (inclusive)
pub const WARNING_PERCENT: f64 = 80.0;

/// Percentage of the limit at which a scope enters Alert (inclusive)
pub const ALERT_PERCENT: f64 = 100.0;

/// Severity of a scope's spend-to-limit ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Normal,
    Warning,
    Alert,
}

impl Tier {
    /// Classify a percentage. `[80, 100)` is Warning, `>= 100` is Alert.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= ALERT_PERCENT {
            Self::Alert
        } else if percentage >= WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Warning => write!(f, "Warning"),
            Self::Alert => write!(f, "Alert"),
        }
    }
}

/// Result of evaluating one scope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdStatus {
    /// `100 * spent / limit`, not clamped; 0 when the limit is unconfigured
    pub percentage_used: f64,
    pub tier: Tier,
    /// `limit - spent`; negative means over budget by `|remaining|`
    pub remaining: f64,
}

impl ThresholdStatus {
    /// Status for a scope with no usable limit
    pub const UNCONSTRAINED: ThresholdStatus = ThresholdStatus {
        percentage_used: 0.0,
        tier: Tier::Normal,
        remaining: 0.0,
    };

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }

    /// Percentage clamped to `0..=100` for progress bars
    pub fn display_percentage(&self) -> f64 {
        self.percentage_used.clamp(0.0, 100.0)
    }
}

/// Evaluate spend against a limit.
///
/// Total over all inputs: negative or non-finite `spent` counts as 0, and a
/// limit that is not a positive finite number means "no constraint" and
/// always yields Normal.
pub fn evaluate(spent: f64, limit: f64) -> ThresholdStatus {
    let spent = if spent.is_finite() { spent.max(0.0) } else { 0.0 };

    if !limit.is_finite() || limit <= 0.0 {
        return ThresholdStatus::UNCONSTRAINED;
    }

    let percentage_used = (spent / limit) * 100.0;

    ThresholdStatus {
        percentage_used,
        tier: Tier::from_percentage(percentage_used),
        remaining: limit - spent,
    }
}
