use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use runora::cli::{
    handle_balance_command, handle_budget_command, handle_expense_command, handle_export_command,
    handle_import_command, handle_reset_command, handle_rollover_command,
    handle_settings_command, handle_summary_command, handle_tag_command,
};
use runora::config::{paths::RunoraPaths, settings::Settings};
use runora::logging::init_tracing;
use runora::storage::open_json_storage;
use runora::store::Store;

#[derive(Parser)]
#[command(
    name = "runora",
    version,
    about = "Personal budget and expense tracking",
    long_about = "Runora keeps a monthly budget, the expenses you record against it, \
                  and tags to group them. Set a recurring monthly budget and it is \
                  applied automatically when a new month starts."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly budget commands
    #[command(subcommand)]
    Budget(runora::cli::BudgetCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(runora::cli::ExpenseCommands),

    /// Tag commands
    #[command(subcommand)]
    Tag(runora::cli::TagCommands),

    /// Show the remaining balance and totals
    Balance,

    /// Show spending by tag
    Summary {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// Summarise every month
        #[arg(long)]
        all: bool,
    },

    /// Apply the monthly budget if this month hasn't had it yet
    Rollover,

    /// Preferences and app settings
    #[command(subcommand)]
    Settings(runora::cli::SettingsCommands),

    /// Export all data to a JSON file
    Export {
        /// Directory to write to (defaults to the configured export directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Import data from a JSON file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Delete all data and start over
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RunoraPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Open the store and bring it up to date
    let storage = open_json_storage(&paths)?;
    let mut store = Store::open(storage, settings);
    if store.is_persist_blocked() {
        eprintln!(
            "Warning: {} could not be read or moved aside; changes in this run will not be saved.",
            paths.document_file().display()
        );
    }
    if let Some(plan) = store.on_foreground() {
        debug!(month = %plan.month, "Rollover applied on startup");
    }

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut store, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut store, cmd)?,
        Some(Commands::Tag(cmd)) => handle_tag_command(&mut store, cmd)?,
        Some(Commands::Balance) => handle_balance_command(&store)?,
        Some(Commands::Summary { month, all }) => handle_summary_command(&store, month, all)?,
        Some(Commands::Rollover) => handle_rollover_command(&mut store)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&mut store, &paths, cmd)?,
        Some(Commands::Export { dir }) => handle_export_command(&store, &paths, dir)?,
        Some(Commands::Import { file }) => handle_import_command(&mut store, &file)?,
        Some(Commands::Reset { yes }) => handle_reset_command(&mut store, yes)?,
        Some(Commands::Config) => {
            let settings = store.settings();
            println!("Runora Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Document:         {}", paths.document_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Export directory: {}",
                settings.resolve_export_dir(&paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Rollover policy:  {:?}", settings.rollover_policy);
            println!("  Persist throttle: {} ms", settings.persist_throttle_ms);
        }
        None => {
            println!("Runora - personal budget and expense tracking");
            println!();
            println!("Run 'runora --help' for usage information.");
            println!("Run 'runora balance' to see where you stand this month.");
        }
    }

    store.on_background();
    Ok(())
}
