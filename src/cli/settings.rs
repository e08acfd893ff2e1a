//! Settings CLI commands
//!
//! Document preferences (symbol, currency, region, carry-over, monthly budget)
//! live in the budget document; app settings (rollover policy, export
//! directory) live in `config.json`.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::paths::RunoraPaths;
use crate::config::settings::{RolloverPolicy, Settings};
use crate::error::RunoraResult;
use crate::storage::DocumentStorage;
use crate::store::Store;

use super::parse_amount;

/// Rollover policy as a command-line value
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Add the monthly budget on top of the month's existing budget
    TopUp,
    /// Replace the month's budget with the monthly budget
    Replace,
}

impl From<PolicyArg> for RolloverPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::TopUp => RolloverPolicy::TopUp,
            PolicyArg::Replace => RolloverPolicy::Replace,
        }
    }
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,

    /// Set the currency symbol
    #[command(name = "set-symbol")]
    SetSymbol { symbol: String },

    /// Set the currency name
    #[command(name = "set-currency")]
    SetCurrency { currency: String },

    /// Set the region
    #[command(name = "set-region")]
    SetRegion { region: String },

    /// Accumulate the balance across all budgeted months
    #[command(name = "set-carry-over")]
    SetCarryOver {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Set the recurring monthly budget (0 disables it)
    #[command(name = "set-monthly-budget")]
    SetMonthlyBudget { amount: String },

    /// Choose how the monthly budget combines with an existing month budget
    #[command(name = "set-rollover-policy")]
    SetRolloverPolicy {
        #[arg(value_enum)]
        policy: PolicyArg,
    },

    /// Set where exports are written
    #[command(name = "set-export-dir")]
    SetExportDir { dir: PathBuf },
}

/// Handle a settings command
pub fn handle_settings_command<S: DocumentStorage>(
    store: &mut Store<S>,
    paths: &RunoraPaths,
    cmd: SettingsCommands,
) -> RunoraResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let doc = store.document();
            let settings = store.settings();
            println!("Budget preferences");
            println!("  Symbol:          {}", doc.symbol);
            println!("  Currency:        {}", doc.currency);
            println!("  Region:          {}", doc.region);
            println!("  Carry over:      {}", doc.carry_over_budget);
            println!(
                "  Monthly budget:  {}",
                doc.monthly_budget.format_with_symbol(&doc.symbol)
            );
            match doc.last_budget_update {
                Some(at) => println!("  Last rollover:   {}", at.format("%Y-%m-%d %H:%M UTC")),
                None => println!("  Last rollover:   never"),
            }
            println!();
            println!("App settings");
            println!("  Rollover policy: {:?}", settings.rollover_policy);
            println!(
                "  Export dir:      {}",
                settings.resolve_export_dir(paths).display()
            );
            println!("  Persist throttle: {} ms", settings.persist_throttle_ms);
            println!("  Date format:     {}", settings.date_format);
        }

        SettingsCommands::SetSymbol { symbol } => {
            store.set_symbol(symbol.trim());
            println!("Currency symbol set to {}", store.document().symbol);
        }

        SettingsCommands::SetCurrency { currency } => {
            store.set_currency(currency.trim());
            println!("Currency set to {}", store.document().currency);
        }

        SettingsCommands::SetRegion { region } => {
            store.set_region(region.trim());
            println!("Region set to {}", store.document().region);
        }

        SettingsCommands::SetCarryOver { enabled } => {
            let balance = store.set_carry_over_budget(enabled);
            println!(
                "Carry over {}",
                if enabled { "enabled" } else { "disabled" }
            );
            println!(
                "Remaining balance: {}",
                balance.format_with_symbol(&store.document().symbol)
            );
        }

        SettingsCommands::SetMonthlyBudget { amount } => {
            let amount = parse_amount(&amount)?;
            store.set_monthly_budget(amount)?;
            println!(
                "Monthly budget set to {}",
                amount.format_with_symbol(&store.document().symbol)
            );
        }

        SettingsCommands::SetRolloverPolicy { policy } => {
            let mut settings: Settings = store.settings().clone();
            settings.rollover_policy = policy.into();
            settings.save(paths)?;
            println!("Rollover policy set to {:?}", settings.rollover_policy);
        }

        SettingsCommands::SetExportDir { dir } => {
            let mut settings: Settings = store.settings().clone();
            settings.export_dir = Some(dir);
            settings.save(paths)?;
            println!(
                "Export directory set to {}",
                settings.resolve_export_dir(paths).display()
            );
        }
    }

    Ok(())
}
