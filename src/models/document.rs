//! The budget document
//!
//! Everything the app persists lives in one [`BudgetDocument`], written and
//! read as a whole. Field names on disk are camelCase.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RunoraError, RunoraResult};

use super::expense::Expense;
use super::ids::{ExpenseId, TagId};
use super::money::Money;
use super::month::MonthKey;
use super::tag::{DefaultTag, Tag};

/// Root persisted entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDocument {
    /// Explicit budget per month
    #[serde(default)]
    pub budgets: BTreeMap<MonthKey, Money>,

    /// Expenses per month, in insertion order
    #[serde(default)]
    pub expenses: BTreeMap<MonthKey, Vec<Expense>>,

    /// Tags in creation order
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Currency symbol for display
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Currency name
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Region name
    #[serde(default = "default_region")]
    pub region: String,

    /// Accumulate the balance across all budgeted months
    #[serde(default)]
    pub carry_over_budget: bool,

    /// Default allotment for months without an explicit budget
    #[serde(default)]
    pub monthly_budget: Money,

    /// Last time the monthly rollover was applied
    #[serde(default)]
    pub last_budget_update: Option<DateTime<Utc>>,

    /// Derived; recomputed after every mutation
    #[serde(default)]
    pub remaining_balance: Money,
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_currency() -> String {
    "rupees".to_string()
}

fn default_region() -> String {
    "India".to_string()
}

impl Default for BudgetDocument {
    fn default() -> Self {
        Self {
            budgets: BTreeMap::new(),
            expenses: BTreeMap::new(),
            tags: Vec::new(),
            symbol: default_symbol(),
            currency: default_currency(),
            region: default_region(),
            carry_over_budget: false,
            monthly_budget: Money::zero(),
            last_budget_update: None,
            remaining_balance: Money::zero(),
        }
    }
}

impl BudgetDocument {
    /// A fresh document with the default tag set
    pub fn seeded() -> Self {
        let mut doc = Self::default();
        doc.seed_default_tags();
        doc
    }

    /// Add the default tags if the document has none
    ///
    /// Returns whether anything was added.
    pub fn seed_default_tags(&mut self) -> bool {
        if !self.tags.is_empty() {
            return false;
        }
        self.tags = DefaultTag::all().iter().map(|d| d.to_tag()).collect();
        true
    }

    /// Expenses for a month (empty if none)
    pub fn expenses_for(&self, month: MonthKey) -> &[Expense] {
        self.expenses.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of a month's expenses
    pub fn month_spending(&self, month: MonthKey) -> Money {
        self.expenses_for(month).iter().map(|e| e.amount).sum()
    }

    /// Iterate over every expense in every month, oldest month first
    pub fn all_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.values().flatten()
    }

    pub fn find_expense(&self, month: MonthKey, id: &ExpenseId) -> Option<&Expense> {
        self.expenses_for(month).iter().find(|e| &e.id == id)
    }

    pub fn find_tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.id == id)
    }

    /// Find a tag by exact id, case-insensitive name/label, or unique id prefix
    ///
    /// A prefix shared by several tags is rejected rather than guessed.
    pub fn resolve_tag(&self, identifier: &str) -> RunoraResult<&Tag> {
        let identifier = identifier.trim();
        if let Some(tag) = self.tags.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(tag);
        }
        let lower = identifier.to_lowercase();
        if let Some(tag) = self
            .tags
            .iter()
            .find(|t| t.name.to_lowercase() == lower || t.label.to_lowercase() == lower)
        {
            return Ok(tag);
        }

        let mut matches = self.tags.iter().filter(|t| t.id.matches(identifier));
        match (matches.next(), matches.count()) {
            (Some(tag), 0) => Ok(tag),
            (Some(_), rest) => Err(RunoraError::ambiguous_id("tag", identifier, rest + 1)),
            (None, _) => Err(RunoraError::tag_not_found(identifier)),
        }
    }
}
