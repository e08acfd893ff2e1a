//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the store.

pub mod backup;
pub mod budget;
pub mod expense;
pub mod settings;
pub mod tag;

pub use backup::{handle_export_command, handle_import_command, handle_reset_command};
pub use budget::{
    handle_balance_command, handle_budget_command, handle_rollover_command, handle_summary_command,
    BudgetCommands,
};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use tag::{handle_tag_command, TagCommands};

use chrono::NaiveDate;

use crate::error::{RunoraError, RunoraResult};
use crate::models::{Money, MonthKey, TagId};
use crate::storage::DocumentStorage;
use crate::store::Store;

/// Parse a user-entered amount ("250", "₹1,200.50", "12.5")
pub fn parse_amount(input: &str) -> RunoraResult<Money> {
    Money::parse(input)
        .map_err(|e| RunoraError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

/// Parse a month argument relative to `current`
///
/// Accepts `YYYY-MM`, a full date, or `current`/`last`/`next`; `None` means
/// the current month.
pub fn parse_month(input: Option<&str>, current: MonthKey) -> RunoraResult<MonthKey> {
    match input.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("current") | Some("this") => Ok(current),
        Some("last") | Some("prev") | Some("previous") => Ok(current.prev()),
        Some("next") => Ok(current.next()),
        Some(other) => MonthKey::parse(other)
            .map_err(|e| RunoraError::Validation(format!("Invalid month: {}", e))),
    }
}

/// Parse a date argument (`YYYY-MM-DD`, or `today`)
pub fn parse_date(input: Option<&str>, today: NaiveDate) -> RunoraResult<NaiveDate> {
    match input.map(str::trim) {
        None | Some("today") => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            RunoraError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
    }
}

/// Resolve tag names or ids to tag ids
pub fn resolve_tags<S: DocumentStorage>(
    store: &Store<S>,
    identifiers: &[String],
) -> RunoraResult<Vec<TagId>> {
    identifiers
        .iter()
        .map(|ident| store.resolve_tag(ident).map(|t| t.id.clone()))
        .collect()
}
