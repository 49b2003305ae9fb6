//! Reports module for SpendWatch
//!
//! Provides the monthly report, spending analytics, trend insights and
//! savings goal progress.

pub mod analytics;
pub mod monthly;
pub mod savings;
pub mod trend;

pub use analytics::SpendingAnalytics;
pub use monthly::{CategoryLine, MonthlyReport};
pub use savings::{SavingsGoal, SavingsProgress, SavingsTier};
pub use trend::{analyze, analyze_all, InsightKind, TrendInsight, TREND_THRESHOLD_PERCENT};
