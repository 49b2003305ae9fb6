//! Savings goal CLI commands

use clap::Subcommand;

use crate::error::{TrackerError, TrackerResult};
use crate::models::format_amount;
use crate::reports::{SavingsGoal, SavingsTier};

use super::CommandContext;

/// Savings subcommands
#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Set the annual savings target
    Goal {
        /// Target amount for the year
        target: f64,
    },

    /// Show progress towards the savings target
    Progress {
        /// Amount saved so far
        #[arg(short, long)]
        saved: f64,
    },
}

/// Handle a savings command
pub fn handle_savings_command(ctx: &CommandContext<'_>, cmd: SavingsCommands) -> TrackerResult<()> {
    let symbol = ctx.symbol();

    match cmd {
        SavingsCommands::Goal { target } => {
            let goal = SavingsGoal::new(target)?;
            let mut settings = ctx.settings.clone();
            settings.savings_goal = Some(goal.target());
            settings.save(ctx.storage.paths())?;

            tracing::debug!(goal = goal.target(), "Savings goal set");
            println!(
                "Savings goal set to {} ({} per month)",
                format_amount(symbol, goal.target()),
                format_amount(symbol, goal.monthly_target())
            );
        }

        SavingsCommands::Progress { saved } => {
            let target = ctx.settings.savings_goal.ok_or_else(|| {
                TrackerError::Config(
                    "No savings goal set. Run 'spendwatch savings goal <amount>' first.".into(),
                )
            })?;
            let goal = SavingsGoal::new(target)?;
            let progress = goal.progress(saved, symbol);

            let marker = match progress.tier {
                SavingsTier::Reached => "[+]",
                SavingsTier::AlmostThere | SavingsTier::InProgress => "[i]",
            };
            println!(
                "Saved {} of {} ({:.1}%)",
                format_amount(symbol, progress.saved),
                format_amount(symbol, progress.target),
                progress.display_percent()
            );
            println!("Monthly target: {}", format_amount(symbol, goal.monthly_target()));
            println!("{} {}", marker, progress.message);
        }
    }

    Ok(())
}
