//! Tag display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetDocument, Tag};

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Expenses")]
    uses: usize,
    #[tabled(rename = "Custom")]
    custom: &'static str,
}

/// Number of expenses (in any month) carrying the tag
fn usage_count(doc: &BudgetDocument, tag: &Tag) -> usize {
    doc.all_expenses().filter(|e| e.has_tag(&tag.id)).count()
}

/// Format all tags as a table
pub fn format_tag_list(doc: &BudgetDocument) -> String {
    if doc.tags.is_empty() {
        return "No tags found.".to_string();
    }

    let rows: Vec<TagRow> = doc
        .tags
        .iter()
        .map(|t| TagRow {
            id: t.id.short(),
            icon: t.icon.clone(),
            name: t.name.clone(),
            label: t.label.clone(),
            color: t.color.clone(),
            uses: usage_count(doc, t),
            custom: if t.is_custom { "yes" } else { "" },
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format one tag in detail
pub fn format_tag_details(doc: &BudgetDocument, tag: &Tag) -> String {
    let mut output = String::new();
    output.push_str(&format!("Tag: {} {}\n", tag.icon, tag.display_name()));
    output.push_str(&format!("  ID:       {}\n", tag.id));
    output.push_str(&format!("  Name:     {}\n", tag.name));
    output.push_str(&format!("  Color:    {}\n", tag.color));
    output.push_str(&format!(
        "  Type:     {}\n",
        if tag.is_custom { "custom" } else { "default" }
    ));
    output.push_str(&format!("  Expenses: {}\n", usage_count(doc, tag)));
    output
}
