//! Report CLI commands

use clap::Subcommand;

use crate::error::TrackerResult;
use crate::models::Month;
use crate::reports::{analyze_all, InsightKind, MonthlyReport, SpendingAnalytics};

use super::CommandContext;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending against the overall budget, by category
    Monthly {
        /// Month to report on (YYYY-MM); all time when omitted
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Spending per category, per day and per month
    Analytics {
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Compare a month's category spending with earlier months
    Trends {
        /// Month to compare (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
}

/// Handle a report command
pub fn handle_report_command(ctx: &CommandContext<'_>, cmd: ReportCommands) -> TrackerResult<()> {
    let symbol = ctx.symbol();

    match cmd {
        ReportCommands::Monthly { month } => {
            let report = MonthlyReport::generate(ctx.storage, &ctx.user, month)?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Analytics { month } => {
            let expenses: Vec<_> = ctx
                .storage
                .expenses
                .list_for_user(&ctx.user, None)?
                .into_iter()
                .filter(|e| month.map_or(true, |m| m.contains(e.date)))
                .collect();
            println!("{}", SpendingAnalytics::generate(&expenses).format_terminal(symbol));
        }

        ReportCommands::Trends { month } => {
            let month = month.unwrap_or_else(Month::current);
            let expenses = ctx.storage.expenses.list_for_user(&ctx.user, None)?;
            let insights = analyze_all(&expenses, month);

            if insights.is_empty() {
                println!("No notable changes in {} {}.", month.name(), month.year());
            }
            for insight in insights {
                let marker = match insight.kind {
                    InsightKind::Warning => "[!]",
                    InsightKind::Praise => "[+]",
                };
                println!("{} {}", marker, insight.message);
            }
        }
    }

    Ok(())
}
