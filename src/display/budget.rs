//! Budget and balance display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{BudgetDocument, Money, MonthKey};
use crate::services;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Left")]
    left: String,
}

/// Format every month that has a budget or expenses
pub fn format_budget_list(doc: &BudgetDocument) -> String {
    let mut months: Vec<MonthKey> = doc
        .budgets
        .keys()
        .chain(doc.expenses.keys())
        .copied()
        .collect();
    months.sort();
    months.dedup();

    if months.is_empty() {
        return "No budgets set.".to_string();
    }

    let rows: Vec<BudgetRow> = months
        .iter()
        .map(|m| {
            let budget = doc.budgets.get(m).copied();
            let spent = doc.month_spending(*m);
            BudgetRow {
                month: m.to_string(),
                budget: budget
                    .map(|b| b.format_with_symbol(&doc.symbol))
                    .unwrap_or_else(|| "-".to_string()),
                spent: spent.format_with_symbol(&doc.symbol),
                left: (budget.unwrap_or_default() - spent).format_with_symbol(&doc.symbol),
            }
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Format the home-screen figures: balance, this month, and all-time totals
pub fn format_balance(doc: &BudgetDocument, current: MonthKey) -> String {
    let symbol = doc.symbol.as_str();
    let balance: Money = services::calculate_remaining_balance(doc, current);
    let mut output = String::new();

    output.push_str(&format!("Remaining balance: {}\n", balance.format_with_symbol(symbol)));
    output.push_str(&format!(
        "  Mode:            {}\n",
        if doc.carry_over_budget {
            "carry over (all budgeted months)"
        } else {
            "this month only"
        }
    ));
    output.push_str(&format!("\n{}\n", current));
    output.push_str(&format!(
        "  Budget:          {}\n",
        services::effective_budget(doc, current).format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:           {}\n",
        doc.month_spending(current).format_with_symbol(symbol)
    ));
    output.push_str("\nAll months\n");
    output.push_str(&format!(
        "  Total budget:    {}\n",
        services::total_budget(doc).format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Total expenses:  {}\n",
        services::total_expenses(doc).format_with_symbol(symbol)
    ));
    if doc.monthly_budget.is_positive() {
        output.push_str(&format!(
            "  Monthly budget:  {}\n",
            doc.monthly_budget.format_with_symbol(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_list() {
        let mut doc = BudgetDocument::seeded();
        doc.budgets
            .insert(MonthKey::parse("2025-02").unwrap(), Money::from_units(100));
        doc.budgets
            .insert(MonthKey::parse("2025-01").unwrap(), Money::from_units(50));

        let output = format_budget_list(&doc);
        let jan = output.find("2025-01").unwrap();
        let feb = output.find("2025-02").unwrap();
        assert!(jan < feb);
        assert!(output.contains("₹100.00"));
    }

    #[test]
    fn test_empty_budget_list() {
        assert_eq!(format_budget_list(&BudgetDocument::seeded()), "No budgets set.");
    }

    #[test]
    fn test_balance() {
        let mut doc = BudgetDocument::seeded();
        let month = MonthKey::parse("2025-03").unwrap();
        doc.budgets.insert(month, Money::from_units(300));
        let output = format_balance(&doc, month);
        assert!(output.starts_with("Remaining balance: ₹300.00"));
        assert!(output.contains("this month only"));
    }
}
