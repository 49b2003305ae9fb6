//! Budget CLI commands
//!
//! Implements CLI commands for setting, listing and removing spending limits.

use clap::Subcommand;

use crate::display::format_budget_list;
use crate::error::TrackerResult;
use crate::models::{format_amount, ScopeId};
use crate::services::BudgetService;

use super::{report_alerts, CommandContext};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the limit for overall spending or one category
    Set {
        /// "overall" or a category name
        scope: ScopeId,
        /// Spending limit
        limit: f64,
    },

    /// List budgets
    #[command(alias = "ls")]
    List,

    /// Remove a budget
    #[command(alias = "rm")]
    Remove {
        /// "overall" or a category name
        scope: ScopeId,
    },
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &CommandContext<'_>, cmd: BudgetCommands) -> TrackerResult<()> {
    let monitor = ctx.monitor();
    let service = BudgetService::new(ctx.storage, &monitor);
    let symbol = ctx.symbol();

    match cmd {
        BudgetCommands::Set { scope, limit } => {
            let (budget, outcome) = service.set(&ctx.user, scope, limit)?;
            println!(
                "Budget for {} set to {}",
                budget.scope,
                format_amount(symbol, budget.limit)
            );
            report_alerts(ctx, &outcome);
        }

        BudgetCommands::List => {
            let budgets = service.list(&ctx.user)?;
            println!("{}", format_budget_list(&budgets, symbol));
        }

        BudgetCommands::Remove { scope } => {
            let removed = service.remove(&ctx.user, scope)?;
            println!("Removed budget for {}", removed.scope);
        }
    }

    Ok(())
}
