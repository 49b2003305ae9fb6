//! Budget threshold alerts
//!
//! The decision-making core of SpendWatch:
//!
//! - `threshold`: classifies spend against a limit into Normal / Warning /
//!   Alert. Pure.
//! - `aggregate`: sums expenses per category, tolerating unreadable records.
//!   Pure.
//! - `dedup`: the per-scope state machine that decides whether a tier change
//!   must be announced. Stateful; callers go through the notification
//!   repository's single mutation point.
//! - `notification`: the user-facing record built for each announcement.

pub mod aggregate;
pub mod dedup;
pub mod notification;
pub mod threshold;

pub use aggregate::{aggregate_by_category, aggregate_json, CategoryTotals, RawExpense, SpendRecord};
pub use dedup::{advance, Advance, AnnouncedTier, NotificationLog, NotificationState};
pub use notification::{BudgetNotification, NotificationKind};
pub use threshold::{evaluate, ThresholdStatus, Tier, ALERT_PERCENT, WARNING_PERCENT};
