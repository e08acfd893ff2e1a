//! Month-rollover reconciliation
//!
//! The document is *stale* when the recurring monthly budget has not yet been
//! applied to the current calendar month: `lastBudgetUpdate` is unset or falls
//! in a different month. Applying the rollover makes it *up to date* until the
//! month changes again, so repeated checks within a month do nothing.

use chrono::{DateTime, Utc};

use crate::config::settings::RolloverPolicy;
use crate::models::{BudgetDocument, Money, MonthKey};

/// Rollover state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverState {
    UpToDate,
    Stale,
}

/// Determine the rollover state at `now`
pub fn rollover_state(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> RolloverState {
    match last_update {
        Some(last) if MonthKey::from_datetime(last) == MonthKey::from_datetime(now) => {
            RolloverState::UpToDate
        }
        _ => RolloverState::Stale,
    }
}

/// What applying the rollover to the current month would do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverPlan {
    pub month: MonthKey,
    pub previous: Option<Money>,
    pub new_budget: Money,
}

/// Compute the budget the current month gets when a stale document rolls over
///
/// Returns `None` when the document is already up to date.
pub fn plan_rollover(
    doc: &BudgetDocument,
    now: DateTime<Utc>,
    policy: RolloverPolicy,
) -> Option<RolloverPlan> {
    if rollover_state(doc.last_budget_update, now) == RolloverState::UpToDate {
        return None;
    }

    let month = MonthKey::from_datetime(now);
    let previous = doc.budgets.get(&month).copied();
    let new_budget = match policy {
        RolloverPolicy::TopUp => previous.unwrap_or_default() + doc.monthly_budget,
        RolloverPolicy::Replace => doc.monthly_budget,
    };

    Some(RolloverPlan {
        month,
        previous,
        new_budget,
    })
}
