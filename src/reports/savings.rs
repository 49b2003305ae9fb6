//! Savings goal progress
//!
//! A goal is an annual savings target. Progress compares what has been saved
//! so far against it and picks one of three messages.

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};

/// Share of the target that counts as "almost there"
pub const ALMOST_THERE_FRACTION: f64 = 0.1;

/// Upper bound for the displayed progress percentage
pub const MAX_DISPLAY_PERCENT: f64 = 1000.0;

/// Annual savings target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsGoal {
    target: f64,
}

impl SavingsGoal {
    /// Create a goal; the target must be a positive finite amount
    pub fn new(target: f64) -> TrackerResult<Self> {
        if !target.is_finite() || target <= 0.0 {
            return Err(TrackerError::Validation(
                "Savings goal must be a positive amount".into(),
            ));
        }
        Ok(Self { target })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn monthly_target(&self) -> f64 {
        self.target / 12.0
    }

    /// Progress towards the goal given the amount saved so far
    pub fn progress(&self, saved: f64, symbol: &str) -> SavingsProgress {
        let remaining = self.target - saved;
        let percent = saved / self.target * 100.0;

        let (tier, message) = if percent >= 100.0 {
            (
                SavingsTier::Reached,
                "You've reached your savings goal!".to_string(),
            )
        } else if remaining <= self.target * ALMOST_THERE_FRACTION {
            (
                SavingsTier::AlmostThere,
                format!(
                    "Almost there! Only {}{:.2} left to reach your goal!",
                    symbol, remaining
                ),
            )
        } else {
            (
                SavingsTier::InProgress,
                format!("{}{:.2} away from your savings target.", symbol, remaining),
            )
        };

        SavingsProgress {
            saved,
            target: self.target,
            percent,
            remaining: remaining.max(0.0),
            tier,
            message,
        }
    }
}

/// How close a goal is to being met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsTier {
    Reached,
    AlmostThere,
    InProgress,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsProgress {
    pub saved: f64,
    pub target: f64,
    /// Raw percentage, may exceed 100
    pub percent: f64,
    /// Amount still to save, never negative
    pub remaining: f64,
    pub tier: SavingsTier,
    pub message: String,
}

impl SavingsProgress {
    pub fn display_percent(&self) -> f64 {
        self.percent.clamp(0.0, MAX_DISPLAY_PERCENT)
    }
}
