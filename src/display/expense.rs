//! Expense display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{BudgetDocument, Expense, Money, MonthKey};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

/// Comma-separated display names of an expense's tags
pub(crate) fn tag_names(doc: &BudgetDocument, expense: &Expense) -> String {
    expense
        .tags
        .iter()
        .map(|id| match doc.find_tag(id) {
            Some(tag) => tag.display_name().to_string(),
            None => id.short(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a month's expenses as a table with a total line
pub fn format_expense_list(
    doc: &BudgetDocument,
    month: MonthKey,
    expenses: &[Expense],
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return format!("No expenses recorded for {}.", month);
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short(),
            date: e.date.format(date_format).to_string(),
            name: e.name.clone(),
            amount: e.amount.format_with_symbol(&doc.symbol),
            tags: tag_names(doc, e),
        })
        .collect();

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let table = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()))
        .to_string();

    format!(
        "Expenses for {}\n{}\n\n{} expense(s), total {}",
        month,
        table,
        expenses.len(),
        total.format_with_symbol(&doc.symbol)
    )
}

/// Format one expense in detail
pub fn format_expense_details(doc: &BudgetDocument, expense: &Expense) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:      {}\n", expense.id));
    output.push_str(&format!("  Date:    {}\n", expense.date));
    output.push_str(&format!(
        "  Amount:  {}\n",
        expense.amount.format_with_symbol(&doc.symbol)
    ));
    if !expense.tags.is_empty() {
        output.push_str(&format!("  Tags:    {}\n", tag_names(doc, expense)));
    }
    output.push_str(&format!(
        "  Created: {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(updated) = expense.updated_at {
        output.push_str(&format!(
            "  Updated: {}\n",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    output
}
