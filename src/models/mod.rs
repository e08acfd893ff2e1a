//! Core data models for Runora
//!
//! The budget document and the records it holds: expenses, tags, and the
//! value types (money, month keys, ids) they are built from.

pub mod document;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod tag;

pub use document::BudgetDocument;
pub use expense::{Expense, ExpensePatch, ExpenseValidationError, NewExpense};
pub use ids::{ExpenseId, TagId};
pub use money::Money;
pub use month::MonthKey;
pub use tag::{DefaultTag, Tag, TagPatch, TagValidationError};
