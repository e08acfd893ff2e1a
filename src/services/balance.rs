//! Remaining-balance derivation
//!
//! The balance is never stored authoritatively; it is recomputed from the
//! document after each mutation. Two policies:
//!
//! - month-local: the current month's budget (explicit, else the recurring
//!   monthly budget) minus the current month's spending;
//! - carry-over: the running sum of `budget - spending` over every month that
//!   has an explicit budget, oldest first. An overspent month reduces what is
//!   left for later months.

use crate::models::{BudgetDocument, Money, MonthKey};

/// Remaining balance as of `current`
pub fn calculate_remaining_balance(doc: &BudgetDocument, current: MonthKey) -> Money {
    if doc.carry_over_budget {
        carried_balance(doc)
    } else {
        month_balance(doc, current)
    }
}

/// Budget available for a month: explicit entry, else the recurring budget
///
/// An explicit zero (only reachable through import) counts as unset.
pub fn effective_budget(doc: &BudgetDocument, month: MonthKey) -> Money {
    doc.budgets
        .get(&month)
        .copied()
        .filter(|b| !b.is_zero())
        .unwrap_or(doc.monthly_budget)
}

fn month_balance(doc: &BudgetDocument, month: MonthKey) -> Money {
    effective_budget(doc, month) - doc.month_spending(month)
}

fn carried_balance(doc: &BudgetDocument) -> Money {
    // BTreeMap iteration is chronological
    doc.budgets
        .iter()
        .map(|(month, budget)| *budget - doc.month_spending(*month))
        .sum()
}

/// Sum of every explicit budget
pub fn total_budget(doc: &BudgetDocument) -> Money {
    doc.budgets.values().sum()
}

/// Sum of every expense in every month
pub fn total_expenses(doc: &BudgetDocument) -> Money {
    doc.all_expenses().map(|e| e.amount).sum()
}
