//! Whole-document import
//!
//! An import file is parsed and validated in full before anything is touched:
//! either every present field is accepted and merged, or the whole import is
//! rejected. Merging is last-write-wins per top-level key; keys absent from
//! the file leave the document's value in place.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{RunoraError, RunoraResult};
use crate::models::{BudgetDocument, Expense, Money, MonthKey, Tag};
use crate::storage::read_json_value;

/// A validated import, ready to merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentImport {
    pub budgets: Option<BTreeMap<MonthKey, Money>>,
    pub expenses: Option<BTreeMap<MonthKey, Vec<Expense>>>,
    pub tags: Option<Vec<Tag>>,
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub region: Option<String>,
    pub carry_over_budget: Option<bool>,
    pub monthly_budget: Option<Money>,
    pub last_budget_update: Option<Option<DateTime<Utc>>>,
}

/// What an import changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Top-level keys taken from the file
    pub fields: Vec<&'static str>,
    pub budgets: usize,
    pub expenses: usize,
    pub tags: usize,
    /// Expense tag references dropped because the tag no longer exists
    pub dangling_tags_removed: usize,
}

fn import_err(msg: impl Into<String>) -> RunoraError {
    RunoraError::Import(msg.into())
}

impl DocumentImport {
    /// Read and validate an import file
    pub fn from_file(path: &Path) -> RunoraResult<Self> {
        let value = read_json_value(path).map_err(|e| import_err(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate an already-parsed import
    pub fn from_value(value: Value) -> RunoraResult<Self> {
        let Value::Object(root) = value else {
            return Err(import_err("Import file must contain a JSON object"));
        };

        let mut import = Self::default();

        if let Some(v) = present(&root, "budgets") {
            import.budgets = Some(parse_budgets(v)?);
        }
        if let Some(v) = present(&root, "expenses") {
            import.expenses = Some(parse_expenses(v)?);
        }
        if let Some(v) = present(&root, "tags") {
            import.tags = Some(parse_tags(v)?);
        }
        if let Some(v) = present(&root, "symbol") {
            import.symbol = Some(typed(v, "symbol")?);
        }
        if let Some(v) = present(&root, "currency") {
            import.currency = Some(typed(v, "currency")?);
        }
        if let Some(v) = present(&root, "region") {
            import.region = Some(typed(v, "region")?);
        }
        if let Some(v) = present(&root, "carryOverBudget") {
            import.carry_over_budget = Some(typed(v, "carryOverBudget")?);
        }
        if let Some(v) = root.get("monthlyBudget") {
            let amount: Money = typed(v, "monthlyBudget")?;
            if amount.is_negative() {
                return Err(import_err("monthlyBudget cannot be negative"));
            }
            import.monthly_budget = Some(amount);
        }
        if let Some(v) = root.get("lastBudgetUpdate") {
            import.last_budget_update = Some(typed(v, "lastBudgetUpdate")?);
        }

        Ok(import)
    }

    /// Merge over a document
    ///
    /// The derived balance is not taken from the file; the caller recomputes it.
    pub fn apply(self, doc: &mut BudgetDocument) -> ImportSummary {
        let mut summary = ImportSummary::default();

        if let Some(budgets) = self.budgets {
            summary.fields.push("budgets");
            summary.budgets = budgets.len();
            doc.budgets = budgets;
        }
        if let Some(expenses) = self.expenses {
            summary.fields.push("expenses");
            summary.expenses = expenses.values().map(Vec::len).sum();
            doc.expenses = expenses;
        }
        if let Some(tags) = self.tags {
            summary.fields.push("tags");
            summary.tags = tags.len();
            doc.tags = tags;
        }
        if let Some(symbol) = self.symbol {
            summary.fields.push("symbol");
            doc.symbol = symbol;
        }
        if let Some(currency) = self.currency {
            summary.fields.push("currency");
            doc.currency = currency;
        }
        if let Some(region) = self.region {
            summary.fields.push("region");
            doc.region = region;
        }
        if let Some(carry_over) = self.carry_over_budget {
            summary.fields.push("carryOverBudget");
            doc.carry_over_budget = carry_over;
        }
        if let Some(monthly) = self.monthly_budget {
            summary.fields.push("monthlyBudget");
            doc.monthly_budget = monthly;
        }
        if let Some(last) = self.last_budget_update {
            summary.fields.push("lastBudgetUpdate");
            doc.last_budget_update = last;
        }

        // Keep every expense tag reference resolvable
        let known: Vec<_> = doc.tags.iter().map(|t| t.id.clone()).collect();
        for expense in doc.expenses.values_mut().flatten() {
            let before = expense.tags.len();
            expense.tags.retain(|t| known.contains(t));
            summary.dangling_tags_removed += before - expense.tags.len();
        }

        summary
    }
}

/// A key that is present and not null
fn present<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    root.get(key).filter(|v| !v.is_null())
}

fn typed<T: DeserializeOwned>(value: &Value, field: &str) -> RunoraResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| import_err(format!("Invalid {}: {}", field, e)))
}

fn month_key(key: &str, field: &str) -> RunoraResult<MonthKey> {
    let month = MonthKey::parse(key)
        .map_err(|e| import_err(format!("Invalid {} key: {}", field, e)))?;
    if month.to_string() != key {
        return Err(import_err(format!(
            "Invalid {} key '{}', expected YYYY-MM",
            field, key
        )));
    }
    Ok(month)
}

fn parse_budgets(value: &Value) -> RunoraResult<BTreeMap<MonthKey, Money>> {
    let Value::Object(map) = value else {
        return Err(import_err("budgets must be an object keyed by month"));
    };

    let mut budgets = BTreeMap::new();
    for (key, amount) in map {
        let month = month_key(key, "budgets")?;
        let amount: Money = typed(amount, "budgets")?;
        if amount.is_negative() {
            return Err(import_err(format!(
                "Budget for {} cannot be negative ({})",
                month, amount
            )));
        }
        budgets.insert(month, amount);
    }
    Ok(budgets)
}

fn parse_expenses(value: &Value) -> RunoraResult<BTreeMap<MonthKey, Vec<Expense>>> {
    let Value::Object(map) = value else {
        return Err(import_err("expenses must be an object keyed by month"));
    };

    let mut expenses = BTreeMap::new();
    for (key, list) in map {
        let month = month_key(key, "expenses")?;
        let bucket: Vec<Expense> = typed(list, "expenses")?;
        for expense in &bucket {
            if let Err(e) = expense.validate() {
                return Err(import_err(format!("Expense {}: {}", expense.id, e)));
            }
            if !month.contains(expense.date) {
                return Err(import_err(format!(
                    "Expense {} dated {} is filed under {}",
                    expense.id, expense.date, month
                )));
            }
        }
        expenses.insert(month, bucket);
    }
    Ok(expenses)
}

fn parse_tags(value: &Value) -> RunoraResult<Vec<Tag>> {
    let Value::Array(entries) = value else {
        return Err(import_err("tags must be a list"));
    };

    for (i, entry) in entries.iter().enumerate() {
        let has_string = |key: &str| entry.get(key).is_some_and(Value::is_string);
        if !has_string("id") || !has_string("name") {
            return Err(import_err(format!(
                "Tag {} must have a string id and name",
                i
            )));
        }
    }

    let tags: Vec<Tag> = typed(value, "tags")?;
    for (i, tag) in tags.iter().enumerate() {
        if tags[..i].iter().any(|t| t.id == tag.id) {
            return Err(import_err(format!("Duplicate tag id {}", tag.id)));
        }
    }
    Ok(tags)
}
