//! Expense model
//!
//! An expense is a dated, positive amount with an optional set of tags. It is
//! stored in the month bucket named by the first seven characters of its date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, TagId};
use super::money::Money;
use super::month::MonthKey;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier, assigned on creation and never changed
    pub id: ExpenseId,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Free-text description
    #[serde(default)]
    pub name: String,

    /// Amount spent (always positive once stored)
    pub amount: Money,

    /// Ids of the tags attached to this expense
    #[serde(default)]
    pub tags: Vec<TagId>,

    /// When the expense was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the expense was last edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Build a stored expense from user input, assigning a fresh id
    pub fn from_new(new: NewExpense) -> Self {
        let mut tags = Vec::with_capacity(new.tags.len());
        for tag in new.tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            id: ExpenseId::new(),
            date: new.date,
            name: new.name.trim().to_string(),
            amount: new.amount,
            tags,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The month bucket this expense belongs in
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Check whether the expense carries a tag
    pub fn has_tag(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }

    /// Remove a tag reference, returning whether it was present
    pub fn remove_tag(&mut self, tag: &TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Merge a patch over this expense, leaving unlisted fields and the id alone
    pub fn apply(&mut self, patch: &ExpensePatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(tags) = &patch.tags {
            self.tags.clear();
            for tag in tags {
                if !self.tags.contains(tag) {
                    self.tags.push(tag.clone());
                }
            }
        }
        self.updated_at = Some(Utc::now());
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_amount(self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.name, self.amount)
    }
}

/// Input for a new expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub name: String,
    pub amount: Money,
    pub tags: Vec<TagId>,
}

impl NewExpense {
    pub fn new(date: NaiveDate, name: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            name: name.into(),
            amount,
            tags: Vec::new(),
        }
    }

    /// Attach tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Validate the input amount
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_amount(self.amount)
    }
}

/// Partial update of an expense; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub tags: Option<Vec<TagId>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.name.is_none() && self.amount.is_none() && self.tags.is_none()
    }
}

fn validate_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(ExpenseValidationError::NonPositiveAmount(amount))
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    WrongMonth { month: MonthKey, date: NaiveDate },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be a positive number (got {})", amount)
            }
            Self::WrongMonth { month, date } => {
                write!(f, "Expense dated {} does not belong to month {}", date, month)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
