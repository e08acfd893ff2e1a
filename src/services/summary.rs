//! Spending summary by tag
//!
//! The data behind the home screen's pie chart: how much was spent under each
//! tag, for one month or across all months.

use std::collections::HashMap;

use crate::models::{BudgetDocument, Expense, Money, MonthKey, TagId};

/// Spending attributed to one tag
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpending {
    pub tag_id: TagId,
    /// Display name of the tag
    pub label: String,
    /// Display colour hint
    pub color: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of total spending, 0-100
    pub percentage: f64,
}

/// Spending broken down by tag
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    /// The month summarised, or `None` for all months
    pub month: Option<MonthKey>,
    /// Tags with any spending, largest first
    pub by_tag: Vec<TagSpending>,
    /// Sum of every expense in scope
    pub total_spending: Money,
    pub expense_count: usize,
    /// Spending on expenses with no (known) tag
    pub untagged: Money,
    pub untagged_count: usize,
}

impl SpendingSummary {
    /// Summarise a month, or every month when `month` is `None`
    ///
    /// An expense with several tags counts in full toward each of them, so
    /// tag totals can add up to more than `total_spending`. References to tags
    /// that no longer exist are treated as untagged.
    pub fn generate(doc: &BudgetDocument, month: Option<MonthKey>) -> Self {
        let expenses: Vec<&Expense> = match month {
            Some(m) => doc.expenses_for(m).iter().collect(),
            None => doc.all_expenses().collect(),
        };

        let total_spending: Money = expenses.iter().map(|e| e.amount).sum();
        let mut totals: HashMap<&TagId, (Money, usize)> = HashMap::new();
        let mut untagged = Money::zero();
        let mut untagged_count = 0;

        for expense in &expenses {
            let mut counted = false;
            for tag_id in &expense.tags {
                if doc.find_tag(tag_id).is_none() {
                    continue;
                }
                let entry = totals.entry(tag_id).or_insert((Money::zero(), 0));
                entry.0 += expense.amount;
                entry.1 += 1;
                counted = true;
            }
            if !counted {
                untagged += expense.amount;
                untagged_count += 1;
            }
        }

        // Walk tags in creation order so equal totals keep a stable order
        let mut by_tag: Vec<TagSpending> = doc
            .tags
            .iter()
            .filter_map(|tag| {
                totals.get(&tag.id).map(|(total, count)| TagSpending {
                    tag_id: tag.id.clone(),
                    label: tag.display_name().to_string(),
                    color: tag.color.clone(),
                    total: *total,
                    expense_count: *count,
                    percentage: percentage(*total, total_spending),
                })
            })
            .collect();
        by_tag.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            month,
            by_tag,
            total_spending,
            expense_count: expenses.len(),
            untagged,
            untagged_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }
}

fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::NaiveDate;

    fn add(doc: &mut BudgetDocument, day: u32, units: i64, tags: Vec<TagId>) {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        doc.expenses
            .entry(MonthKey::from_date(date))
            .or_default()
            .push(Expense::from_new(
                NewExpense::new(date, "x", Money::from_units(units)).with_tags(tags),
            ));
    }

    #[test]
    fn test_summary_by_tag() {
        let mut doc = BudgetDocument::seeded();
        let food = doc.tags[0].id.clone();
        let transport = doc.tags[1].id.clone();
        add(&mut doc, 1, 30, vec![food.clone()]);
        add(&mut doc, 2, 50, vec![transport.clone()]);
        add(&mut doc, 3, 20, vec![]);

        let month = MonthKey::parse("2025-01").unwrap();
        let summary = SpendingSummary::generate(&doc, Some(month));

        assert_eq!(summary.total_spending, Money::from_units(100));
        assert_eq!(summary.expense_count, 3);
        assert_eq!(summary.by_tag.len(), 2);
        assert_eq!(summary.by_tag[0].tag_id, transport);
        assert_eq!(summary.by_tag[0].label, "Transportation");
        assert!((summary.by_tag[0].percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.by_tag[1].tag_id, food);
        assert_eq!(summary.untagged, Money::from_units(20));
        assert_eq!(summary.untagged_count, 1);
    }

    #[test]
    fn test_multi_tag_expense_counts_for_each() {
        let mut doc = BudgetDocument::seeded();
        let a = doc.tags[0].id.clone();
        let b = doc.tags[3].id.clone();
        add(&mut doc, 5, 40, vec![a, b]);

        let summary = SpendingSummary::generate(&doc, None);
        assert_eq!(summary.by_tag.len(), 2);
        assert!(summary.by_tag.iter().all(|t| t.total == Money::from_units(40)));
        assert!(summary.untagged.is_zero());
    }

    #[test]
    fn test_dangling_tag_is_untagged() {
        let mut doc = BudgetDocument::seeded();
        add(&mut doc, 5, 40, vec![TagId::from_string("gone")]);

        let summary = SpendingSummary::generate(&doc, None);
        assert!(summary.by_tag.is_empty());
        assert_eq!(summary.untagged, Money::from_units(40));
    }

    #[test]
    fn test_empty_month() {
        let doc = BudgetDocument::seeded();
        let summary = SpendingSummary::generate(&doc, Some(MonthKey::parse("2030-01").unwrap()));
        assert!(summary.is_empty());
        assert!(summary.total_spending.is_zero());
    }
}
