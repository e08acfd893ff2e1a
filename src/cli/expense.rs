//! Expense CLI commands

use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list};
use crate::error::RunoraResult;
use crate::models::{ExpensePatch, MonthKey, NewExpense};
use crate::storage::DocumentStorage;
use crate::store::Store;

use super::{parse_amount, parse_date, parse_month, resolve_tags};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "250" or "12.50")
        amount: String,
        /// Description
        name: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Tag name or ID (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (or prefix)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        name: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Replace tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or prefix)
        id: String,
    },

    /// Show one expense
    Show {
        /// Expense ID (or prefix)
        id: String,
    },

    /// List a month's expenses
    List {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
        /// Only expenses with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
}

/// Find an expense by id prefix, returning its month and full id
fn locate<S: DocumentStorage>(
    store: &Store<S>,
    id: &str,
) -> RunoraResult<(MonthKey, crate::models::ExpenseId)> {
    store
        .find_expense(id)
        .map(|(month, e)| (month, e.id.clone()))
}

/// Handle an expense command
pub fn handle_expense_command<S: DocumentStorage>(
    store: &mut Store<S>,
    cmd: ExpenseCommands,
) -> RunoraResult<()> {
    let today = store.now().date_naive();
    let symbol = store.document().symbol.clone();

    match cmd {
        ExpenseCommands::Add {
            amount,
            name,
            date,
            tags,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref(), today)?;
            let tag_ids = resolve_tags(store, &tags)?;
            let month = MonthKey::from_date(date);

            let expense = store.add_expense(
                month,
                NewExpense::new(date, name, amount).with_tags(tag_ids),
            )?;

            println!(
                "Added expense: {} {} on {}",
                expense.name,
                expense.amount.format_with_symbol(&symbol),
                expense.date
            );
            println!("  ID: {}", expense.id);
            println!(
                "Remaining balance: {}",
                store.remaining_balance().format_with_symbol(&symbol)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            name,
            date,
            tags,
            clear_tags,
        } => {
            let (month, expense_id) = locate(store, &id)?;

            let mut patch = ExpensePatch {
                name,
                ..Default::default()
            };
            if let Some(amount) = amount {
                patch.amount = Some(parse_amount(&amount)?);
            }
            if let Some(date) = date {
                patch.date = Some(parse_date(Some(&date), today)?);
            }
            if clear_tags {
                patch.tags = Some(Vec::new());
            } else if !tags.is_empty() {
                patch.tags = Some(resolve_tags(store, &tags)?);
            }

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let expense = store.update_expense(month, &expense_id, &patch)?;
            println!("Updated expense {}", expense.id.short());
            print!("{}", format_expense_details(store.document(), &expense));
        }

        ExpenseCommands::Delete { id } => {
            let (month, expense_id) = locate(store, &id)?;
            let expense = store.delete_expense(month, &expense_id)?;

            println!(
                "Deleted expense: {} {}",
                expense.name,
                expense.amount.format_with_symbol(&symbol)
            );
            println!(
                "Remaining balance: {}",
                store.remaining_balance().format_with_symbol(&symbol)
            );
        }

        ExpenseCommands::Show { id } => {
            let (_, expense) = store.find_expense(&id)?;
            print!("{}", format_expense_details(store.document(), expense));
        }

        ExpenseCommands::List { month, tag } => {
            let month = parse_month(month.as_deref(), store.current_month())?;
            let filter = match tag {
                Some(ident) => Some(store.resolve_tag(&ident)?.id.clone()),
                None => None,
            };

            let expenses: Vec<_> = store
                .get_expenses(month)
                .iter()
                .filter(|e| filter.as_ref().map_or(true, |t| e.has_tag(t)))
                .cloned()
                .collect();

            println!(
                "{}",
                format_expense_list(
                    store.document(),
                    month,
                    &expenses,
                    &store.settings().date_format
                )
            );
        }
    }

    Ok(())
}
