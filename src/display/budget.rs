//! Envelope and category display formatting

use crate::models::{Budget, BudgetEnvelope, ExpenseCategory, MonthPeriod};
use crate::reports::NO_ENVELOPE_LABEL;

use super::report::format_percentage;

/// Format a team's envelopes as a table
pub fn format_envelope_list(envelopes: &[BudgetEnvelope]) -> String {
    if envelopes.is_empty() {
        return "No envelopes found.\n\nRun 'teamfin budget envelope add' to create one.".to_string();
    }

    let name_width = envelopes
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>6}  {:<8}  {}\n",
        "Envelope",
        "Share",
        "Class",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->6}  {:-<8}  {:-<12}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for envelope in envelopes {
        output.push_str(&format!(
            "{:<width$}  {:>6}  {:<8}  {}\n",
            envelope.name,
            format_percentage(envelope.percentage),
            envelope.classification,
            envelope.id,
            width = name_width
        ));
    }

    let total: rust_decimal::Decimal = envelopes.iter().map(|e| e.percentage).sum();
    output.push_str(&format!("\nTotal allocated: {}\n", format_percentage(total)));

    output
}

/// Format categories grouped under the envelope they are linked to
pub fn format_category_tree(envelopes: &[BudgetEnvelope], categories: &[ExpenseCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'teamfin init' to create default categories."
            .to_string();
    }

    let mut output = String::new();
    let mut sections: Vec<(String, Vec<&ExpenseCategory>)> = envelopes
        .iter()
        .map(|envelope| {
            let linked = categories
                .iter()
                .filter(|c| c.envelope_id == Some(envelope.id))
                .collect();
            (envelope.name.clone(), linked)
        })
        .collect();

    let unlinked: Vec<_> = categories
        .iter()
        .filter(|c| {
            c.envelope_id
                .map(|id| !envelopes.iter().any(|e| e.id == id))
                .unwrap_or(true)
        })
        .collect();
    if !unlinked.is_empty() {
        sections.push((NO_ENVELOPE_LABEL.to_string(), unlinked));
    }

    for (i, (title, members)) in sections.iter().enumerate() {
        output.push_str(&format!("{}\n", title));

        if members.is_empty() {
            output.push_str("  (no categories)\n");
        } else {
            for (j, category) in members.iter().enumerate() {
                let prefix = if j == members.len() - 1 { "└── " } else { "├── " };
                output.push_str(&format!("  {}{}\n", prefix, category.name));
            }
        }

        if i < sections.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format the income line of a month
pub fn format_budget(period: MonthPeriod, budget: Option<&Budget>, symbol: &str) -> String {
    match budget {
        Some(budget) => format!(
            "Income for {}: {}",
            period,
            budget.total_income.format_with_symbol(symbol)
        ),
        None => format!("No income declared for {}.", period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Money, TeamId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_envelope_list() {
        let team = TeamId::new();
        let envelopes = vec![
            BudgetEnvelope::new(team, "Essenciais", dec!(0.5)).with_classification(Classification::Needs),
            BudgetEnvelope::new(team, "Lazer", dec!(0.3)),
        ];

        let output = format_envelope_list(&envelopes);
        assert!(output.contains("Essenciais"));
        assert!(output.contains("needs"));
        assert!(output.contains("Total allocated: 80%"));
    }

    #[test]
    fn test_category_tree_has_unlinked_section() {
        let team = TeamId::new();
        let envelope = BudgetEnvelope::new(team, "Essenciais", dec!(0.5));
        let categories = vec![
            ExpenseCategory::linked(team, "Mercado", envelope.id),
            ExpenseCategory::new(team, "Presentes"),
        ];

        let output = format_category_tree(&[envelope], &categories);
        assert!(output.contains("Essenciais\n  └── Mercado"));
        assert!(output.contains("Sem Pasta\n  └── Presentes"));
    }

    #[test]
    fn test_format_budget() {
        let period = MonthPeriod::new(2025, 2).unwrap();
        let team = TeamId::new();
        let budget = Budget::new(team, period, Money::from_cents(123456));

        assert_eq!(
            format_budget(period, Some(&budget), "R$"),
            "Income for 2025-02: R$ 1234.56"
        );
        assert_eq!(format_budget(period, None, "R$"), "No income declared for 2025-02.");
    }
}
