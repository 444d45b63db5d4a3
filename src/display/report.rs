//! Report formatting for terminal output
//!
//! Renders the dashboard, the classification summary and the projection as
//! fixed-width text tables. Amounts are rounded to cents here and nowhere
//! earlier.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Money, MonthPeriod};
use crate::reports::{ClassificationSummary, DashboardAggregate, ProjectionPoint};

const WIDTH: usize = 78;
const BAR_WIDTH: usize = 10;

/// Format an income fraction as a percentage ("35%", "12.5%")
pub fn format_percentage(fraction: Decimal) -> String {
    let pct = (fraction * Decimal::ONE_HUNDRED).round_dp(1).normalize();
    format!("{}%", pct)
}

/// Create a usage bar; `usage` is spent over budgeted, capped at full
pub fn format_bar(usage: Decimal, width: usize) -> String {
    if usage <= Decimal::ZERO {
        return "░".repeat(width);
    }

    let filled = (usage * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Render the monthly dashboard
pub fn render_dashboard(period: MonthPeriod, dashboard: &DashboardAggregate, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Dashboard - {}\n", period));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("Income:    {:>16}\n", money(dashboard.total_income, symbol)));
    output.push_str(&format!("Spent:     {:>16}\n", money(dashboard.total_spent, symbol)));
    output.push_str(&format!("Balance:   {:>16}\n\n", money(dashboard.balance(), symbol)));

    if dashboard.envelopes.is_empty() {
        output.push_str("No envelopes configured.\n");
    } else {
        output.push_str(&format!(
            "{:<22} {:>6} {:>14} {:>14}  {}\n",
            "Envelope", "Share", "Budgeted", "Spent", "Usage"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for envelope in &dashboard.envelopes {
            let usage = envelope.usage().unwrap_or(Decimal::ZERO);
            let marker = if envelope.is_overspent() { " *" } else { "" };
            output.push_str(&format!(
                "{:<22} {:>6} {:>14} {:>14}  {}{}\n",
                truncate(&envelope.name, 22),
                format_percentage(envelope.percentage),
                money(envelope.budgeted, symbol),
                money(envelope.spent, symbol),
                format_bar(usage, BAR_WIDTH),
                marker
            ));
        }
    }

    if !dashboard.breakdown.is_empty() {
        output.push_str(&format!(
            "\n{:<28} {:<22} {:>14}\n",
            "Category", "Envelope", "Amount"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for row in &dashboard.breakdown {
            output.push_str(&format!(
                "{:<28} {:<22} {:>14}\n",
                truncate(&row.category_name, 28),
                truncate(&row.envelope_name, 22),
                money(row.amount, symbol)
            ));
        }
    }

    if dashboard.envelopes.iter().any(|e| e.is_overspent()) {
        output.push_str("\n* = Overspent\n");
    }

    output
}

/// Render the per-classification summary
pub fn render_classification_summary(
    period: MonthPeriod,
    summary: &ClassificationSummary,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget Summary - {}\n", period));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:<8} {:>14} {:>14} {:>14}\n",
        "Envelope", "Class", "Budgeted", "Spent", "Remaining"
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for row in &summary.envelopes {
        output.push_str(&format!(
            "{:<24} {:<8} {:>14} {:>14} {:>14}\n",
            truncate(&row.name, 24),
            row.classification,
            money(row.budgeted, symbol),
            money(row.spent, symbol),
            money(row.remaining, symbol)
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');

    for total in &summary.totals {
        output.push_str(&format!(
            "{:<33} {:>14} {:>14} {:>14}\n",
            total.classification.as_str().to_uppercase(),
            money(total.budgeted, symbol),
            money(total.spent, symbol),
            money(total.remaining, symbol)
        ));
    }

    output
}

/// Render a projection series
pub fn render_projection(points: &[ProjectionPoint], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Investment Projection\n");
    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<10} {:>18} {:>18} {:>18}\n",
        "When", "Total", "Invested", "Yield"
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for point in points {
        output.push_str(&format!(
            "{:<10} {:>18} {:>18} {:>18}\n",
            point.month_label,
            money(point.total_value, symbol),
            money(point.total_contributed, symbol),
            money(point.yield_to_date, symbol)
        ));
    }

    output
}
