//! Alert CLI commands
//!
//! Budget status, manual rechecks, the alerts journal and ad-hoc aggregation
//! of expense files.

use std::path::Path;

use clap::Subcommand;

use crate::alerts::aggregate_json;
use crate::dispatch::JournalSink;
use crate::display::{format_alert_history, format_category_totals, format_status_table};
use crate::error::{TrackerError, TrackerResult};

use super::{report_alerts, CommandContext};

/// Alert subcommands
#[derive(Subcommand)]
pub enum AlertsCommands {
    /// Re-evaluate every budget and announce new crossings
    Recheck,

    /// Show delivered alerts
    History {
        /// Number of alerts to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

/// Handle an alerts command
pub fn handle_alerts_command(ctx: &CommandContext<'_>, cmd: AlertsCommands) -> TrackerResult<()> {
    match cmd {
        AlertsCommands::Recheck => {
            let outcome = ctx.monitor().recheck_all(&ctx.user)?;
            if outcome.fired() {
                report_alerts(ctx, &outcome);
            } else {
                println!(
                    "Checked {} budget(s); nothing new to report.",
                    outcome.evaluated
                );
            }
        }

        AlertsCommands::History { count } => {
            let journal = JournalSink::new(ctx.storage.paths().alerts_log());
            let entries = journal.read_recent(&ctx.user, count)?;
            println!("{}", format_alert_history(&entries));
        }
    }

    Ok(())
}

/// Print the read-only budget status
pub fn handle_status(ctx: &CommandContext<'_>) -> TrackerResult<()> {
    let reports = ctx.monitor().status(&ctx.user)?;
    println!("Budget status for {}", ctx.user);
    println!("{}", format_status_table(&reports, ctx.symbol()));
    Ok(())
}

/// Aggregate an arbitrary JSON list of expenses by category
pub fn handle_analyze(ctx: &CommandContext<'_>, file: &Path) -> TrackerResult<()> {
    let contents = std::fs::read_to_string(file)
        .map_err(|e| TrackerError::Io(format!("Failed to read {}: {}", file.display(), e)))?;
    let document: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| TrackerError::Json(format!("Failed to parse {}: {}", file.display(), e)))?;

    let totals = aggregate_json(&document)?;
    println!("{}", format_category_totals(&totals, ctx.symbol()));
    Ok(())
}
