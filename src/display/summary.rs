//! Spending summary formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::SpendingSummary;

#[derive(Tabled)]
struct SpendingRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Spent")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format per-tag spending
pub fn format_spending_summary(summary: &SpendingSummary, symbol: &str) -> String {
    let scope = match summary.month {
        Some(month) => month.to_string(),
        None => "all months".to_string(),
    };

    if summary.is_empty() {
        return format!("No spending for {}.", scope);
    }

    let mut rows: Vec<SpendingRow> = summary
        .by_tag
        .iter()
        .map(|t| SpendingRow {
            tag: t.label.clone(),
            count: t.expense_count,
            total: t.total.format_with_symbol(symbol),
            share: format!("{:.1}%", t.percentage),
        })
        .collect();

    if summary.untagged_count > 0 {
        let share = if summary.total_spending.is_zero() {
            0.0
        } else {
            summary.untagged.cents() as f64 / summary.total_spending.cents() as f64 * 100.0
        };
        rows.push(SpendingRow {
            tag: "(untagged)".to_string(),
            count: summary.untagged_count,
            total: summary.untagged.format_with_symbol(symbol),
            share: format!("{:.1}%", share),
        });
    }

    let table = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    format!(
        "Spending by tag: {}\n{}\n\nTotal: {} across {} expense(s)",
        scope,
        table,
        summary.total_spending.format_with_symbol(symbol),
        summary.expense_count
    )
}
