//! CSV export of reports
//!
//! Amounts are written as plain two-decimal numbers without a currency
//! symbol so spreadsheets read them as numbers.

use std::io::Write;

use serde::Serialize;

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::MonthPeriod;
use crate::reports::{ClassificationSummary, DashboardAggregate, ProjectionPoint};

#[derive(Serialize)]
struct DashboardRow<'a> {
    period: String,
    section: &'a str,
    name: &'a str,
    envelope: &'a str,
    share: String,
    budgeted: String,
    spent: String,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    period: String,
    envelope: &'a str,
    classification: &'a str,
    budgeted: String,
    spent: String,
    remaining: String,
}

#[derive(Serialize)]
struct ProjectionRow<'a> {
    month: u32,
    label: &'a str,
    total: String,
    invested: String,
    #[serde(rename = "yield")]
    yield_to_date: String,
}

fn export_err(e: impl std::fmt::Display) -> TeamFinError {
    TeamFinError::Export(e.to_string())
}

/// Export the dashboard: one row per envelope, one per breakdown bucket and
/// a closing totals row
pub fn export_dashboard_csv<W: Write>(
    period: MonthPeriod,
    dashboard: &DashboardAggregate,
    writer: W,
) -> TeamFinResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    for envelope in &dashboard.envelopes {
        out.serialize(DashboardRow {
            period: period.to_string(),
            section: "envelope",
            name: &envelope.name,
            envelope: &envelope.name,
            share: envelope.percentage.normalize().to_string(),
            budgeted: envelope.budgeted.to_fixed(),
            spent: envelope.spent.to_fixed(),
        })?;
    }

    for row in &dashboard.breakdown {
        out.serialize(DashboardRow {
            period: period.to_string(),
            section: "category",
            name: &row.category_name,
            envelope: &row.envelope_name,
            share: String::new(),
            budgeted: String::new(),
            spent: row.amount.to_fixed(),
        })?;
    }

    out.serialize(DashboardRow {
        period: period.to_string(),
        section: "total",
        name: "",
        envelope: "",
        share: String::new(),
        budgeted: dashboard.total_income.to_fixed(),
        spent: dashboard.total_spent.to_fixed(),
    })?;

    out.flush().map_err(export_err)
}

/// Export the classification summary: envelope rows followed by one row per
/// classification total
pub fn export_summary_csv<W: Write>(
    period: MonthPeriod,
    summary: &ClassificationSummary,
    writer: W,
) -> TeamFinResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    for row in &summary.envelopes {
        out.serialize(SummaryRow {
            period: period.to_string(),
            envelope: &row.name,
            classification: row.classification.as_str(),
            budgeted: row.budgeted.to_fixed(),
            spent: row.spent.to_fixed(),
            remaining: row.remaining.to_fixed(),
        })?;
    }

    for total in &summary.totals {
        out.serialize(SummaryRow {
            period: period.to_string(),
            envelope: "TOTAL",
            classification: total.classification.as_str(),
            budgeted: total.budgeted.to_fixed(),
            spent: total.spent.to_fixed(),
            remaining: total.remaining.to_fixed(),
        })?;
    }

    out.flush().map_err(export_err)
}

/// Export a projection series
pub fn export_projection_csv<W: Write>(points: &[ProjectionPoint], writer: W) -> TeamFinResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    for point in points {
        out.serialize(ProjectionRow {
            month: point.month,
            label: &point.month_label,
            total: point.total_value.to_fixed(),
            invested: point.total_contributed.to_fixed(),
            yield_to_date: point.yield_to_date.to_fixed(),
        })?;
    }

    out.flush().map_err(export_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, EnvelopeId, Investment, Money, TeamId};
    use crate::reports::{
        project, CategoryBreakdown, ClassificationTotal, EnvelopeReport, EnvelopeSummary,
    };
    use rust_decimal_macros::dec;

    fn period() -> MonthPeriod {
        MonthPeriod::new(2025, 1).unwrap()
    }

    #[test]
    fn test_dashboard_csv() {
        let dashboard = DashboardAggregate {
            total_income: Money::from_units(1000),
            total_spent: Money::from_units(150),
            envelopes: vec![EnvelopeReport {
                envelope_id: EnvelopeId::new(),
                name: "Housing".into(),
                percentage: dec!(0.50),
                budgeted: Money::from_units(500),
                spent: Money::from_units(100),
            }],
            breakdown: vec![CategoryBreakdown {
                category_name: "Sem Categoria".into(),
                amount: Money::from_units(50),
                envelope_name: "Sem Pasta".into(),
            }],
        };

        let mut buffer = Vec::new();
        export_dashboard_csv(period(), &dashboard, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "period,section,name,envelope,share,budgeted,spent");
        assert_eq!(lines[1], "2025-01,envelope,Housing,Housing,0.5,500.00,100.00");
        assert_eq!(lines[2], "2025-01,category,Sem Categoria,Sem Pasta,,,50.00");
        assert_eq!(lines[3], "2025-01,total,,,,1000.00,150.00");
    }

    #[test]
    fn test_summary_csv() {
        let summary = ClassificationSummary {
            envelopes: vec![EnvelopeSummary {
                envelope_id: EnvelopeId::new(),
                name: "Mercado, feira".into(),
                classification: Classification::Needs,
                budgeted: Money::from_units(300),
                spent: Money::from_units(120),
                remaining: Money::from_units(180),
            }],
            totals: vec![ClassificationTotal {
                classification: Classification::Needs,
                budgeted: Money::from_units(300),
                spent: Money::from_units(120),
                remaining: Money::from_units(180),
            }],
        };

        let mut buffer = Vec::new();
        export_summary_csv(period(), &summary, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("\"Mercado, feira\",needs,300.00,120.00,180.00"));
        assert!(output.contains("TOTAL,needs"));
    }

    #[test]
    fn test_projection_csv() {
        let investments = [Investment::new(
            TeamId::new(),
            "CDB",
            Money::from_units(1000),
            Money::from_units(100),
            dec!(12),
        )];

        let mut buffer = Vec::new();
        export_projection_csv(&project(&investments, 1), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "month,label,total,invested,yield");
        assert_eq!(lines[1], "0,Hoje,1000.00,1000.00,0.00");
        assert_eq!(lines.last().unwrap(), &"12,1a 0m,2398.00,2200.00,198.00");
    }
}
