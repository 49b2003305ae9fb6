//! Expense CLI commands
//!
//! Implements CLI commands for logging, listing, editing and deleting
//! expenses.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{format_amount, Category, ExpensePatch};
use crate::services::{ExpenseService, NewExpense};

use super::{report_alerts, CommandContext};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log a new expense
    Add {
        /// What the money was spent on
        label: String,
        /// Amount spent (e.g., "250" or "12.50")
        amount: f64,
        /// Category (food, transport, utilities, entertainment, other)
        #[arg(short, long, default_value = "other")]
        category: Category,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<Category>,
        /// Maximum number of expenses to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID (e.g., "exp-1a2b3c4d")
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete one or more expenses
    #[command(alias = "rm")]
    Delete {
        /// Expense IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete every expense for the current user
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &CommandContext<'_>, cmd: ExpenseCommands) -> TrackerResult<()> {
    let monitor = ctx.monitor();
    let service = ExpenseService::new(ctx.storage, &monitor);
    let symbol = ctx.symbol();

    match cmd {
        ExpenseCommands::Add {
            label,
            amount,
            category,
            date,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let change = service.add(
                &ctx.user,
                NewExpense {
                    label,
                    value: amount,
                    date,
                    category,
                },
            )?;

            for expense in &change.expenses {
                println!(
                    "Added {}: {} {} ({})",
                    expense.id,
                    expense.label,
                    format_amount(symbol, expense.value),
                    expense.category
                );
            }
            report_alerts(ctx, &change.alerts);
        }

        ExpenseCommands::List { category, limit } => {
            let mut expenses = service.list(&ctx.user, category)?;
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }
            println!(
                "{}",
                format_expense_list(&expenses, symbol, &ctx.settings.date_format)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&ctx.user, &id)?;
            println!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Edit {
            id,
            label,
            amount,
            category,
            date,
        } => {
            let patch = ExpensePatch {
                label,
                value: amount,
                date,
                category,
            };
            let change = service.update(&ctx.user, &id, patch)?;
            for expense in &change.expenses {
                println!("Updated {}", expense.id);
            }
            report_alerts(ctx, &change.alerts);
        }

        ExpenseCommands::Delete { ids } => {
            let change = service.delete(&ctx.user, &ids)?;
            println!("Deleted {} expense(s)", change.expenses.len());
            report_alerts(ctx, &change.alerts);
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                return Err(TrackerError::Validation(
                    "Refusing to delete all expenses without --yes".into(),
                ));
            }
            let change = service.clear(&ctx.user)?;
            println!("Deleted {} expense(s)", change.expenses.len());
        }
    }

    Ok(())
}

