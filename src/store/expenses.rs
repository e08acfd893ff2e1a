//! Expense operations on the store

use tracing::debug;

use crate::error::{RunoraError, RunoraResult};
use crate::models::{Expense, ExpenseId, ExpensePatch, ExpenseValidationError, Money, MonthKey, NewExpense, TagId};
use crate::services::SpendingSummary;
use crate::storage::DocumentStorage;

use super::Store;

impl<S: DocumentStorage> Store<S> {
    /// Record a new expense in a month
    ///
    /// The amount must be positive, the date must fall in `month`, and every
    /// tag id must name an existing tag.
    pub fn add_expense(&mut self, month: MonthKey, new: NewExpense) -> RunoraResult<Expense> {
        if let Err(e) = new.validate() {
            return self.reject(RunoraError::Validation(e.to_string()));
        }
        if !month.contains(new.date) {
            let e = ExpenseValidationError::WrongMonth {
                month,
                date: new.date,
            };
            return self.reject(RunoraError::Validation(e.to_string()));
        }
        if let Err(e) = self.check_tags(&new.tags) {
            return self.reject(e);
        }

        let expense = Expense::from_new(new);
        self.doc
            .expenses
            .entry(month)
            .or_default()
            .push(expense.clone());

        debug!(id = %expense.id, %month, amount = %expense.amount, "Expense added");
        self.commit();
        Ok(expense)
    }

    /// Merge a patch over an existing expense
    ///
    /// Fields absent from the patch and the id are preserved. A new date in a
    /// different month moves the expense to that month's bucket.
    pub fn update_expense(
        &mut self,
        month: MonthKey,
        id: &ExpenseId,
        patch: &ExpensePatch,
    ) -> RunoraResult<Expense> {
        let Some(index) = self.position_of(month, id) else {
            return self.reject(RunoraError::expense_not_found(format!("{} in {}", id, month)));
        };
        if let Some(tags) = &patch.tags {
            if let Err(e) = self.check_tags(tags) {
                return self.reject(e);
            }
        }

        let mut updated = self.doc.expenses_for(month)[index].clone();
        updated.apply(patch);
        if let Err(e) = updated.validate() {
            return self.reject(RunoraError::Validation(e.to_string()));
        }

        let target = updated.month();
        if let Some(bucket) = self.doc.expenses.get_mut(&month) {
            if target == month {
                bucket[index] = updated.clone();
            } else {
                bucket.remove(index);
                if bucket.is_empty() {
                    self.doc.expenses.remove(&month);
                }
                self.doc
                    .expenses
                    .entry(target)
                    .or_default()
                    .push(updated.clone());
                debug!(id = %id, from = %month, to = %target, "Expense moved");
            }
        }

        debug!(id = %id, "Expense updated");
        self.commit();
        Ok(updated)
    }

    /// Remove an expense, returning it
    pub fn delete_expense(&mut self, month: MonthKey, id: &ExpenseId) -> RunoraResult<Expense> {
        let Some(index) = self.position_of(month, id) else {
            return self.reject(RunoraError::expense_not_found(format!("{} in {}", id, month)));
        };

        let mut removed = None;
        if let Some(bucket) = self.doc.expenses.get_mut(&month) {
            removed = Some(bucket.remove(index));
            if bucket.is_empty() {
                self.doc.expenses.remove(&month);
            }
        }

        match removed {
            Some(expense) => {
                debug!(id = %id, %month, "Expense deleted");
                self.commit();
                Ok(expense)
            }
            None => self.reject(RunoraError::expense_not_found(id.to_string())),
        }
    }

    /// A month's expenses in insertion order
    pub fn get_expenses(&self, month: MonthKey) -> &[Expense] {
        self.doc.expenses_for(month)
    }

    /// Sum of a month's expenses
    pub fn total_expenses(&self, month: MonthKey) -> Money {
        self.doc.month_spending(month)
    }

    /// Sum of every expense in every month
    pub fn total_expenses_all(&self) -> Money {
        crate::services::total_expenses(&self.doc)
    }

    /// Find an expense anywhere by full id or unique id prefix
    ///
    /// A prefix matching more than one expense is an error, never a guess.
    pub fn find_expense(&self, identifier: &str) -> RunoraResult<(MonthKey, &Expense)> {
        let identifier = identifier.trim();
        if let Some(exact) = self
            .dated_expenses()
            .find(|(_, e)| e.id.as_str() == identifier)
        {
            return Ok(exact);
        }

        let mut matches = self
            .dated_expenses()
            .filter(|(_, e)| e.id.matches(identifier));
        match (matches.next(), matches.count()) {
            (Some(found), 0) => Ok(found),
            (Some(_), rest) => Err(RunoraError::ambiguous_id("expense", identifier, rest + 1)),
            (None, _) => Err(RunoraError::expense_not_found(identifier)),
        }
    }

    /// Per-tag spending for a month, or for all months
    pub fn spending_summary(&self, month: Option<MonthKey>) -> SpendingSummary {
        SpendingSummary::generate(&self.doc, month)
    }

    fn dated_expenses(&self) -> impl Iterator<Item = (MonthKey, &Expense)> + '_ {
        self.doc
            .expenses
            .iter()
            .flat_map(|(month, bucket)| bucket.iter().map(move |e| (*month, e)))
    }

    fn position_of(&self, month: MonthKey, id: &ExpenseId) -> Option<usize> {
        self.doc.expenses_for(month).iter().position(|e| &e.id == id)
    }

    fn check_tags(&self, tags: &[TagId]) -> RunoraResult<()> {
        match tags.iter().find(|t| self.doc.find_tag(t).is_none()) {
            Some(missing) => Err(RunoraError::tag_not_found(missing.as_str())),
            None => Ok(()),
        }
    }
}
