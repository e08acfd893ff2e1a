//! Derivations over the budget document
//!
//! Pure functions: they read a document and compute figures from it. The
//! store calls them after mutations; nothing here touches storage.

pub mod balance;
pub mod rollover;
pub mod summary;

pub use balance::{calculate_remaining_balance, effective_budget, total_budget, total_expenses};
pub use rollover::{plan_rollover, rollover_state, RolloverPlan, RolloverState};
pub use summary::{SpendingSummary, TagSpending};
