//! Budget display formatting
//!
//! Totals are printed with two decimals; the standalone transport fee is
//! printed as a whole number followed by the currency symbol.

use crate::config::settings::Settings;
use crate::models::{CachedBudgetItem, Money};
use crate::services::{BudgetInputs, BudgetSummary};

/// Shown when the budget cache is empty
pub const NO_ITEMS_MESSAGE: &str = "No events enrolled yet. Enroll in events to see them here.";

/// Format the cached budget items as a numbered list
pub fn format_budget_items(items: &[CachedBudgetItem], settings: &Settings) -> String {
    if items.is_empty() {
        return NO_ITEMS_MESSAGE.to_string();
    }

    let symbol = &settings.currency_symbol;
    let title_width = items
        .iter()
        .map(|i| i.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    for (index, item) in items.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {:<title_width$}  {}  Price: {}\n",
            index + 1,
            item.title,
            item.date.format(&settings.date_format),
            item.price().format_with_symbol(symbol),
            title_width = title_width,
        ));
    }

    output
}

/// The tickets line as shown on the budget screen ("Total: $25.00")
pub fn format_tickets_total(total: Money, settings: &Settings) -> String {
    format!("Total: {}", total.format_with_symbol(&settings.currency_symbol))
}

/// Format the budget breakdown and grand total
pub fn format_budget_summary(
    summary: &BudgetSummary,
    inputs: &BudgetInputs,
    settings: &Settings,
) -> String {
    let symbol = &settings.currency_symbol;

    let transport = if inputs.transport_enabled {
        let from = if inputs.governorate.is_empty() {
            "no governorate selected"
        } else {
            inputs.governorate.as_str()
        };
        format!("{} (from {})", summary.transport.format_whole_with_suffix(symbol), from)
    } else {
        "not included".to_string()
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Tickets:        {}\n",
        format_tickets_total(summary.tickets, settings)
    ));
    output.push_str(&format!(
        "Accommodation:  {}\n",
        summary.accommodation.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transport:      {}\n", transport));
    output.push_str(&format!("{}\n", "-".repeat(32)));
    output.push_str(&format!(
        "Grand Total:    {}\n",
        summary.total.format_with_symbol(symbol)
    ));

    output
}
