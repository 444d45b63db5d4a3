//! Period summaries
//!
//! Two views of one month: the dashboard aggregate (envelopes plus category
//! breakdown) and the classification summary used by the budget screen.
//! Both derive budgeted figures from [`budgeted_amount`], so for the same
//! income and envelopes they always agree.

use serde::{Deserialize, Serialize};

use crate::error::TeamFinResult;
use crate::models::{Classification, EnvelopeId, Money, MonthWindow, TeamId};
use crate::sources::{CategorySource, EnvelopeSource, ExpenseSource, PeriodSources};

use super::allocation::{allocate, budgeted_amount, EnvelopeReport};
use super::reconciliation::{reconcile, CategoryBreakdown, CategoryResolver};

/// Everything the dashboard shows for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAggregate {
    pub total_income: Money,
    pub total_spent: Money,
    pub envelopes: Vec<EnvelopeReport>,
    pub breakdown: Vec<CategoryBreakdown>,
}

impl DashboardAggregate {
    pub fn total_budgeted(&self) -> Money {
        self.envelopes.iter().map(|e| e.budgeted).sum()
    }

    /// Income left after everything spent this month
    pub fn balance(&self) -> Money {
        self.total_income - self.total_spent
    }
}

/// Budget vs. spend for one envelope, tagged with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub envelope_id: EnvelopeId,
    pub name: String,
    pub classification: Classification,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
}

/// Totals of every envelope sharing a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationTotal {
    pub classification: Classification,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationSummary {
    pub envelopes: Vec<EnvelopeSummary>,
    /// One entry per classification, in `Classification::all()` order
    pub totals: Vec<ClassificationTotal>,
}

impl ClassificationSummary {
    pub fn total_for(&self, classification: Classification) -> Option<&ClassificationTotal> {
        self.totals
            .iter()
            .find(|t| t.classification == classification)
    }
}

/// Build the dashboard for `team_id` in `month`/`year`.
///
/// A month without a budget record counts as zero income. Nothing is
/// cached; every call reads the sources again.
pub fn summarize<S>(
    sources: &S,
    team_id: TeamId,
    month: u32,
    year: i32,
) -> TeamFinResult<DashboardAggregate>
where
    S: PeriodSources,
{
    let window = MonthWindow::for_month(year, month)?;

    let total_income = sources
        .budget_for(team_id, month, year)?
        .map(|b| b.total_income)
        .unwrap_or_default();
    let envelopes = sources.envelopes_for(team_id)?;
    let categories = sources.categories_for(team_id)?;
    let expenses = sources.expenses_between(team_id, window.start, window.end)?;

    tracing::debug!(
        team = %team_id,
        month,
        year,
        envelopes = envelopes.len(),
        expenses = expenses.len(),
        "summarizing period"
    );

    let reports = allocate(total_income, &envelopes);
    let resolver = CategoryResolver::new(&categories);
    let reconciled = reconcile(&expenses, &resolver, reports);

    Ok(DashboardAggregate {
        total_income,
        total_spent: reconciled.total_spent,
        envelopes: reconciled.envelopes,
        breakdown: reconciled.breakdown,
    })
}

/// Per-envelope and per-classification budget vs. spend for a month.
///
/// `total_income` is supplied by the caller rather than read from the
/// budget record.
pub fn summarize_by_classification<S>(
    sources: &S,
    team_id: TeamId,
    month: u32,
    year: i32,
    total_income: Money,
) -> TeamFinResult<ClassificationSummary>
where
    S: EnvelopeSource + CategorySource + ExpenseSource,
{
    let window = MonthWindow::for_month(year, month)?;

    let envelopes = sources.envelopes_for(team_id)?;
    let resolver = CategoryResolver::new(&sources.categories_for(team_id)?);
    let expenses = sources.expenses_between(team_id, window.start, window.end)?;

    tracing::debug!(
        team = %team_id,
        month,
        year,
        envelopes = envelopes.len(),
        "summarizing by classification"
    );

    let mut rows: Vec<EnvelopeSummary> = envelopes
        .iter()
        .map(|envelope| {
            let budgeted = budgeted_amount(total_income, envelope.percentage);
            EnvelopeSummary {
                envelope_id: envelope.id,
                name: envelope.name.clone(),
                classification: envelope.classification,
                budgeted,
                spent: Money::zero(),
                remaining: budgeted,
            }
        })
        .collect();

    for expense in &expenses {
        let envelope_id = resolver.envelope_of(expense.category_id);
        if let Some(row) = rows.iter_mut().find(|r| Some(r.envelope_id) == envelope_id) {
            row.spent += expense.amount;
            row.remaining -= expense.amount;
        }
    }

    let totals = Classification::all()
        .iter()
        .map(|&classification| {
            let members = rows.iter().filter(|r| r.classification == classification);
            let (budgeted, spent) = members.fold((Money::zero(), Money::zero()), |acc, r| {
                (acc.0 + r.budgeted, acc.1 + r.spent)
            });
            ClassificationTotal {
                classification,
                budgeted,
                spent,
                remaining: budgeted - spent,
            }
        })
        .collect();

    Ok(ClassificationSummary {
        envelopes: rows,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TeamFinError;
    use crate::models::{
        Budget, BudgetEnvelope, Expense, ExpenseCategory, MonthPeriod,
    };
    use crate::sources::{BudgetSource, InMemorySources};
    use crate::reports::reconciliation::UNCATEGORIZED_LABEL;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    struct Team {
        id: TeamId,
        housing: BudgetEnvelope,
        leisure: BudgetEnvelope,
        rent: ExpenseCategory,
        sources: InMemorySources,
    }

    fn team_with_budget(income: i64) -> Team {
        let id = TeamId::new();
        let housing =
            BudgetEnvelope::new(id, "Housing", dec!(0.5)).with_classification(Classification::Needs);
        let leisure =
            BudgetEnvelope::new(id, "Leisure", dec!(0.2)).with_classification(Classification::Wants);
        let rent = ExpenseCategory::linked(id, "Rent", housing.id);

        let sources = InMemorySources {
            budgets: vec![Budget::new(
                id,
                MonthPeriod::new(2025, 1).unwrap(),
                Money::from_units(income),
            )],
            envelopes: vec![housing.clone(), leisure.clone()],
            categories: vec![rent.clone()],
            ..Default::default()
        };

        Team {
            id,
            housing,
            leisure,
            rent,
            sources,
        }
    }

    #[test]
    fn test_summarize_scenario() {
        let mut team = team_with_budget(1000);
        team.sources.expenses = vec![
            Expense::new(team.id, Money::from_units(100), day(2025, 1, 10)).with_category(team.rent.id),
            Expense::new(team.id, Money::from_units(50), day(2025, 1, 20)),
        ];

        let dashboard = summarize(&team.sources, team.id, 1, 2025).unwrap();

        assert_eq!(dashboard.total_income, Money::from_units(1000));
        assert_eq!(dashboard.total_spent, Money::from_units(150));
        assert_eq!(dashboard.envelopes[0].budgeted, Money::from_units(500));
        assert_eq!(dashboard.envelopes[0].spent, Money::from_units(100));
        assert_eq!(dashboard.envelopes[1].budgeted, Money::from_units(200));
        assert!(dashboard.envelopes[1].spent.is_zero());
        assert_eq!(dashboard.total_budgeted(), Money::from_units(700));
        assert_eq!(dashboard.balance(), Money::from_units(850));

        let uncategorized = dashboard
            .breakdown
            .iter()
            .find(|b| b.category_name == UNCATEGORIZED_LABEL)
            .unwrap();
        assert_eq!(uncategorized.amount, Money::from_units(50));
    }

    #[test]
    fn test_month_boundaries_inclusive() {
        let mut team = team_with_budget(1000);
        let window = MonthWindow::for_month(2025, 1).unwrap();
        team.sources.expenses = vec![
            Expense::new(team.id, Money::from_units(1), window.start),
            Expense::new(team.id, Money::from_units(2), window.end),
            Expense::new(team.id, Money::from_units(4), window.end + Duration::milliseconds(1)),
            Expense::new(team.id, Money::from_units(8), window.start - Duration::milliseconds(1)),
        ];

        let dashboard = summarize(&team.sources, team.id, 1, 2025).unwrap();
        assert_eq!(dashboard.total_spent, Money::from_units(3));
    }

    #[test]
    fn test_missing_budget_means_zero_income() {
        let team = team_with_budget(1000);

        let dashboard = summarize(&team.sources, team.id, 2, 2025).unwrap();

        assert!(dashboard.total_income.is_zero());
        assert_eq!(dashboard.envelopes.len(), 2);
        assert!(dashboard.envelopes.iter().all(|e| e.budgeted.is_zero()));
    }

    #[test]
    fn test_empty_team() {
        let sources = InMemorySources::default();
        let dashboard = summarize(&sources, TeamId::new(), 6, 2024).unwrap();

        assert!(dashboard.total_income.is_zero());
        assert!(dashboard.total_spent.is_zero());
        assert!(dashboard.envelopes.is_empty());
        assert!(dashboard.breakdown.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let mut team = team_with_budget(2500);
        team.sources.expenses = vec![
            Expense::new(team.id, Money::new(dec!(33.33)), day(2025, 1, 3)).with_category(team.rent.id),
            Expense::new(team.id, Money::new(dec!(0.01)), day(2025, 1, 4)),
        ];

        let first = summarize(&team.sources, team.id, 1, 2025).unwrap();
        let second = summarize(&team.sources, team.id, 1, 2025).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_month_rejected() {
        let team = team_with_budget(1000);
        let err = summarize(&team.sources, team.id, 13, 2025).unwrap_err();
        assert!(err.is_validation());

        let err = summarize_by_classification(&team.sources, team.id, 0, 2025, Money::zero())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_classification_matches_dashboard() {
        let mut team = team_with_budget(1234);
        team.sources.expenses = vec![
            Expense::new(team.id, Money::new(dec!(99.90)), day(2025, 1, 8)).with_category(team.rent.id),
        ];

        let dashboard = summarize(&team.sources, team.id, 1, 2025).unwrap();
        let summary = summarize_by_classification(
            &team.sources,
            team.id,
            1,
            2025,
            dashboard.total_income,
        )
        .unwrap();

        for (report, row) in dashboard.envelopes.iter().zip(&summary.envelopes) {
            assert_eq!(report.envelope_id, row.envelope_id);
            assert_eq!(report.budgeted, row.budgeted);
            assert_eq!(report.spent, row.spent);
            assert_eq!(report.remaining(), row.remaining);
        }
    }

    #[test]
    fn test_classification_totals() {
        let mut team = team_with_budget(1000);
        team.sources.expenses = vec![
            Expense::new(team.id, Money::from_units(120), day(2025, 1, 8)).with_category(team.rent.id),
        ];

        let summary =
            summarize_by_classification(&team.sources, team.id, 1, 2025, Money::from_units(1000))
                .unwrap();

        let order: Vec<_> = summary.totals.iter().map(|t| t.classification).collect();
        assert_eq!(order, Classification::all().to_vec());

        let needs = summary.total_for(Classification::Needs).unwrap();
        assert_eq!(needs.budgeted, Money::from_units(500));
        assert_eq!(needs.spent, Money::from_units(120));
        assert_eq!(needs.remaining, Money::from_units(380));

        let wants = summary.total_for(Classification::Wants).unwrap();
        assert_eq!(wants.budgeted, Money::from_units(200));
        assert!(wants.spent.is_zero());

        let savings = summary.total_for(Classification::Savings).unwrap();
        assert!(savings.budgeted.is_zero());
        assert_eq!(summary.envelopes[1].envelope_id, team.leisure.id);
        assert_eq!(summary.envelopes[0].envelope_id, team.housing.id);
    }

    struct FailingSources;

    impl BudgetSource for FailingSources {
        fn budget_for(&self, _: TeamId, _: u32, _: i32) -> TeamFinResult<Option<Budget>> {
            Err(TeamFinError::Storage("disk on fire".into()))
        }
    }

    impl EnvelopeSource for FailingSources {
        fn envelopes_for(&self, _: TeamId) -> TeamFinResult<Vec<BudgetEnvelope>> {
            Ok(Vec::new())
        }
    }

    impl CategorySource for FailingSources {
        fn categories_for(&self, _: TeamId) -> TeamFinResult<Vec<ExpenseCategory>> {
            Ok(Vec::new())
        }
    }

    impl ExpenseSource for FailingSources {
        fn expenses_between(
            &self,
            _: TeamId,
            _: DateTime<Utc>,
            _: DateTime<Utc>,
        ) -> TeamFinResult<Vec<Expense>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_source_errors_propagate() {
        let err = summarize(&FailingSources, TeamId::new(), 1, 2025).unwrap_err();
        assert!(matches!(err, TeamFinError::Storage(ref msg) if msg == "disk on fire"));
    }
}
