//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod alerts;
pub mod budget;
pub mod expense;
pub mod export;
pub mod report;
pub mod savings;

pub use alerts::{handle_alerts_command, handle_analyze, handle_status, AlertsCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use savings::{handle_savings_command, SavingsCommands};

use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::models::UserId;
use crate::services::{BudgetMonitor, RecheckOutcome};
use crate::storage::Storage;

/// Everything a command handler needs for one invocation
pub struct CommandContext<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub dispatcher: &'a Dispatcher,
    /// Profile the command acts on
    pub user: UserId,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        dispatcher: &'a Dispatcher,
        user: UserId,
    ) -> Self {
        Self {
            storage,
            settings,
            dispatcher,
            user,
        }
    }

    pub fn monitor(&self) -> BudgetMonitor<'a> {
        BudgetMonitor::new(self.storage, self.settings, self.dispatcher)
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Mention alerts that no sink printed
pub(crate) fn report_alerts(ctx: &CommandContext<'_>, outcome: &RecheckOutcome) {
    if !outcome.fired() || ctx.settings.notifications.console {
        return;
    }
    println!(
        "{} budget alert(s) raised. Run 'spendwatch status' for details.",
        outcome.notifications.len()
    );
}
