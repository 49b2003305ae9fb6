use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendwatch::cli::{
    handle_alerts_command, handle_analyze, handle_budget_command, handle_expense_command,
    handle_export_command, handle_report_command, handle_savings_command, handle_status,
    AlertsCommands, BudgetCommands, CommandContext, ExpenseCommands, ExportCommands,
    ReportCommands, SavingsCommands,
};
use spendwatch::config::{Settings, TrackerPaths};
use spendwatch::dispatch::Dispatcher;
use spendwatch::models::{format_amount, UserId};
use spendwatch::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwatch",
    version,
    about = "Expense tracking with budget alerts",
    long_about = "SpendWatch logs expenses, tracks them against overall and per-category \
                  budgets, and warns you once when spending reaches 80% of a limit and \
                  again when the limit is reached."
)]
struct Cli {
    /// Profile to act on (defaults to the configured default user)
    #[arg(short, long, global = true, env = "SPENDWATCH_USER")]
    user: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show spending against every budget
    Status,

    /// Alert commands
    #[command(subcommand)]
    Alerts(AlertsCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Savings(SavingsCommands),

    /// Total a JSON list of expenses by category
    Analyze {
        /// Path to a JSON file containing an array of expenses
        file: PathBuf,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    spendwatch::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let dispatcher = Dispatcher::from_settings(&settings, &paths);
    let user = UserId::new(
        cli.user
            .clone()
            .unwrap_or_else(|| settings.default_user.clone()),
    );
    let ctx = CommandContext::new(&storage, &settings, &dispatcher, user);

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
        Some(Commands::Status) => handle_status(&ctx)?,
        Some(Commands::Alerts(cmd)) => handle_alerts_command(&ctx, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ctx, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
        Some(Commands::Savings(cmd)) => handle_savings_command(&ctx, cmd)?,
        Some(Commands::Analyze { file }) => handle_analyze(&ctx, &file)?,
        Some(Commands::Init) => {
            println!("Initializing SpendWatch at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  spendwatch budget set overall 5000");
            println!("  spendwatch expense add \"Groceries\" 250 --category food");
        }
        Some(Commands::Config) => {
            println!("SpendWatch Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Alerts journal:  {}", paths.alerts_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default user:    {}", settings.default_user);
            println!("  Console alerts:  {}", settings.notifications.console);
            println!("  Journal alerts:  {}", settings.notifications.journal);
            match settings.savings_goal {
                Some(goal) => println!(
                    "  Savings goal:    {}",
                    format_amount(&settings.currency_symbol, goal)
                ),
                None => println!("  Savings goal:    (not set)"),
            }
        }
        None => {
            println!("SpendWatch - expense tracking with budget alerts");
            println!();
            println!("Run 'spendwatch --help' for usage information.");
        }
    }

    Ok(())
}
