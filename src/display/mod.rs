//! Display formatting for terminal output
//!
//! Renders expenses, tags, budgets and spending summaries as tables for the
//! command line.

pub mod budget;
pub mod expense;
pub mod summary;
pub mod tag;

pub use budget::{format_balance, format_budget_list};
pub use expense::{format_expense_details, format_expense_list};
pub use summary::format_spending_summary;
pub use tag::{format_tag_details, format_tag_list};
