//! Expense and investment display formatting

use std::collections::HashMap;

use crate::models::{CategoryId, Expense, ExpenseCategory, Investment};
use crate::reports::UNCATEGORIZED_LABEL;

use super::report::truncate;

/// Format expenses as a table, resolving category names
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &[ExpenseCategory],
    symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<20}  {:>14}  {}\n",
        "ID", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<20}  {:->14}  {:-<20}\n",
        "", "", "", "", ""
    ));

    for expense in expenses {
        let category = expense
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or(UNCATEGORIZED_LABEL);

        output.push_str(&format!(
            "{:<12}  {:<10}  {:<20}  {:>14}  {}\n",
            expense.id,
            expense.date.format(date_format),
            truncate(category, 20),
            expense.amount.format_with_symbol(symbol),
            expense.description
        ));
    }

    output
}

/// Format investment positions as a table
pub fn format_investment_list(investments: &[Investment], symbol: &str) -> String {
    if investments.is_empty() {
        return "No investments found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<24}  {:>16}  {:>14}  {:>8}\n",
        "Investment", "Current", "Monthly", "Rate/yr"
    ));
    output.push_str(&format!("{:-<24}  {:->16}  {:->14}  {:->8}\n", "", "", "", ""));

    for investment in investments {
        output.push_str(&format!(
            "{:<24}  {:>16}  {:>14}  {:>7}%\n",
            truncate(&investment.name, 24),
            investment.current_amount.format_with_symbol(symbol),
            investment.monthly_contribution.format_with_symbol(symbol),
            investment.annual_return_rate.normalize()
        ));
    }

    output
}
