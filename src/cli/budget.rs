//! Budget CLI commands
//!
//! Implements CLI commands for monthly budgets, the balance overview, the
//! spending summary, and the monthly rollover.

use clap::Subcommand;

use crate::display::{format_balance, format_budget_list, format_spending_summary};
use crate::error::RunoraResult;
use crate::storage::DocumentStorage;
use crate::store::Store;

use super::{parse_amount, parse_month};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// Amount (e.g., "500" or "500.00")
        amount: String,
        /// Month (e.g., "2025-01", "current", "last", "next")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a month's budget
    Remove {
        /// Month (e.g., "2025-01", "current", "last", "next")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budgets
    Show {
        /// Show only this month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: DocumentStorage>(
    store: &mut Store<S>,
    cmd: BudgetCommands,
) -> RunoraResult<()> {
    let current = store.current_month();
    let symbol = store.document().symbol.clone();

    match cmd {
        BudgetCommands::Set { amount, month } => {
            let month = parse_month(month.as_deref(), current)?;
            let amount = parse_amount(&amount)?;
            let balance = store.add_budget(month, amount)?;

            println!("Budget for {} set to {}", month, amount.format_with_symbol(&symbol));
            println!("Remaining balance: {}", balance.format_with_symbol(&symbol));
        }

        BudgetCommands::Remove { month } => {
            let month = parse_month(month.as_deref(), current)?;
            if store.get_budget(month).is_none() {
                println!("No budget set for {}", month);
                return Ok(());
            }
            let balance = store.remove_budget(month);

            println!("Removed budget for {}", month);
            println!("Remaining balance: {}", balance.format_with_symbol(&symbol));
        }

        BudgetCommands::Show { month: Some(month) } => {
            let month = parse_month(Some(&month), current)?;
            let explicit = store.get_budget(month);
            let spent = store.total_expenses(month);

            println!("Budget for {}", month);
            match explicit {
                Some(budget) => println!("  Budget: {}", budget.format_with_symbol(&symbol)),
                None => println!(
                    "  Budget: {} (monthly budget)",
                    store.effective_budget(month).format_with_symbol(&symbol)
                ),
            }
            println!("  Spent:  {}", spent.format_with_symbol(&symbol));
            println!(
                "  Left:   {}",
                (store.effective_budget(month) - spent).format_with_symbol(&symbol)
            );
        }

        BudgetCommands::Show { month: None } => {
            println!("{}", format_budget_list(store.document()));
        }
    }

    Ok(())
}

/// Print the balance overview
pub fn handle_balance_command<S: DocumentStorage>(store: &Store<S>) -> RunoraResult<()> {
    print!("{}", format_balance(store.document(), store.current_month()));
    Ok(())
}

/// Print spending by tag for a month, or for every month
pub fn handle_summary_command<S: DocumentStorage>(
    store: &Store<S>,
    month: Option<String>,
    all: bool,
) -> RunoraResult<()> {
    let month = if all {
        None
    } else {
        Some(parse_month(month.as_deref(), store.current_month())?)
    };

    let summary = store.spending_summary(month);
    println!("{}", format_spending_summary(&summary, &store.document().symbol));
    Ok(())
}

/// Run the monthly rollover check and report what happened
pub fn handle_rollover_command<S: DocumentStorage>(store: &mut Store<S>) -> RunoraResult<()> {
    let symbol = store.document().symbol.clone();

    match store.check_and_update_budget() {
        Some(plan) => {
            println!(
                "Applied monthly budget to {}: {}",
                plan.month,
                plan.new_budget.format_with_symbol(&symbol)
            );
        }
        None => {
            let month = store.current_month();
            println!("Monthly budget already applied for {}", month);
        }
    }
    Ok(())
}
