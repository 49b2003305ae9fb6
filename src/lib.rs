//! SpendWatch - command-line expense tracking with budget alerts
//!
//! Expenses are logged per user and checked against overall and per-category
//! spending limits. Crossing 80% of a limit raises a warning and reaching it
//! raises an alert, each announced once until spending drops back.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expenses, budgets, categories and scopes
//! - `alerts`: Threshold evaluation, aggregation and notification dedup
//! - `storage`: JSON file storage layer
//! - `dispatch`: Notification sinks
//! - `services`: Business logic and the budget monitor
//! - `reports`, `export`, `display`, `cli`: user-facing output
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwatch::alerts::{evaluate, Tier};
//!
//! let status = evaluate(4000.0, 5000.0);
//! assert_eq!(status.tier, Tier::Warning);
//! ```

pub mod alerts;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
