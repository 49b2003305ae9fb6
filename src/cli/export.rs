//! CLI commands for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{default_file_name, export_expenses_csv};

use super::CommandContext;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV with summary sections
    Csv {
        /// Output file path (defaults to expense_report_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(ctx: &CommandContext<'_>, cmd: ExportCommands) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let expenses = ctx.storage.expenses.list_for_user(&ctx.user, None)?;
            if expenses.is_empty() {
                return Err(TrackerError::Export("No expenses to export".into()));
            }

            let output = output.unwrap_or_else(|| PathBuf::from(default_file_name()));
            let file = File::create(&output).map_err(|e| {
                TrackerError::Export(format!("Failed to create file {}: {}", output.display(), e))
            })?;

            let rows = export_expenses_csv(&expenses, BufWriter::new(file))?;
            println!("Exported {} expense(s) to: {}", rows, output.display());
        }
    }

    Ok(())
}
