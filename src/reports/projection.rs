//! Investment growth projection
//!
//! Simulates every month of the horizon but only emits a point each quarter,
//! at the final month and at month zero, which keeps the series small
//! enough to chart.
//!
//! The yield of month `m` is computed on a linear base of
//! `current_amount + monthly_contribution * m` per position rather than on
//! the running compounded balance. Displayed projections depend on this
//! exact formula.

use serde::{Deserialize, Serialize};

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{Investment, Money, TeamId};
use crate::sources::InvestmentSource;

/// Label of the month-zero point
pub const TODAY_LABEL: &str = "Hoje";

/// Longest horizon a projection accepts
pub const MAX_PROJECTION_YEARS: i32 = 100;

/// One sampled instant of the projected series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Months from today
    pub month: u32,
    pub month_label: String,
    pub total_value: Money,
    pub total_contributed: Money,
    pub yield_to_date: Money,
}

/// `"Hoje"` for month zero, otherwise `"{y}a {m}m"` with the year part
/// dropped below twelve months.
pub fn month_label(month: u32) -> String {
    if month == 0 {
        return TODAY_LABEL.to_string();
    }

    let years = month / 12;
    let months = month % 12;
    if years == 0 {
        format!("{}m", months)
    } else {
        format!("{}a {}m", years, months)
    }
}

fn point(month: u32, total: Money, invested: Money) -> ProjectionPoint {
    ProjectionPoint {
        month,
        month_label: month_label(month),
        total_value: total,
        total_contributed: invested,
        yield_to_date: total - invested,
    }
}

/// Project the combined value of `investments` over `years`.
///
/// A horizon of zero or fewer years returns only the month-zero point.
/// Horizons above [`MAX_PROJECTION_YEARS`] are cut to it.
pub fn project(investments: &[Investment], years: i32) -> Vec<ProjectionPoint> {
    let years = years.clamp(0, MAX_PROJECTION_YEARS);
    let total_months = u32::try_from(years).unwrap_or(0) * 12;

    let mut total: Money = investments.iter().map(|i| i.current_amount).sum();
    let mut invested = total;

    let mut points = Vec::new();
    points.push(point(0, total, invested));

    for month in 1..=total_months {
        let mut gain = Money::zero();
        let mut deposit = Money::zero();

        for investment in investments {
            let base = investment.current_amount
                + investment.monthly_contribution.scale(month.into());
            gain += base.scale(investment.monthly_rate());
            deposit += investment.monthly_contribution;
        }

        total += gain + deposit;
        invested += deposit;

        if month % 3 == 0 || month == total_months {
            points.push(point(month, total, invested));
        }
    }

    points
}

/// Project every position of a team
///
/// # Errors
///
/// Returns a validation error for horizons above [`MAX_PROJECTION_YEARS`].
pub fn project_team<S>(sources: &S, team_id: TeamId, years: i32) -> TeamFinResult<Vec<ProjectionPoint>>
where
    S: InvestmentSource,
{
    if years > MAX_PROJECTION_YEARS {
        return Err(TeamFinError::Validation(format!(
            "Projection horizon must be at most {} years, got {}",
            MAX_PROJECTION_YEARS, years
        )));
    }

    let investments = sources.investments_for(team_id)?;
    tracing::debug!(team = %team_id, positions = investments.len(), years, "projecting investments");
    Ok(project(&investments, years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::InMemorySources;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position(current: i64, contribution: i64, rate: Decimal) -> Investment {
        Investment::new(
            TeamId::new(),
            "CDB",
            Money::from_units(current),
            Money::from_units(contribution),
            rate,
        )
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label(0), "Hoje");
        assert_eq!(month_label(3), "3m");
        assert_eq!(month_label(12), "1a 0m");
        assert_eq!(month_label(15), "1a 3m");
        assert_eq!(month_label(121), "10a 1m");
    }

    #[test]
    fn test_one_year_scenario() {
        let points = project(&[position(1000, 100, dec!(12))], 1);

        let months: Vec<_> = points.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![0, 3, 6, 9, 12]);

        for pair in points.windows(2) {
            assert!(pair[1].total_value > pair[0].total_value);
            assert!(pair[1].total_contributed > pair[0].total_contributed);
        }

        // gain of month m is (1000 + 100m) * 1% = 10 + m
        assert_eq!(points[1].total_value, Money::from_units(1336));
        assert_eq!(points[1].total_contributed, Money::from_units(1300));
        assert_eq!(points[1].yield_to_date, Money::from_units(36));

        let last = points.last().unwrap();
        assert_eq!(last.month_label, "1a 0m");
        assert_eq!(last.total_value, Money::from_units(2398));
        assert_eq!(last.total_contributed, Money::from_units(2200));
        assert_eq!(last.yield_to_date, Money::from_units(198));
    }

    #[test]
    fn test_zero_years() {
        let investments = [position(1000, 100, dec!(12)), position(250, 0, dec!(8.5))];

        for years in [0, -3] {
            let points = project(&investments, years);
            assert_eq!(points.len(), 1);
            assert_eq!(points[0].month_label, "Hoje");
            assert_eq!(points[0].total_value, Money::from_units(1250));
            assert_eq!(points[0].total_contributed, Money::from_units(1250));
            assert!(points[0].yield_to_date.is_zero());
        }
    }

    #[test]
    fn test_no_investments() {
        let points = project(&[], 2);

        assert_eq!(points.len(), 9);
        assert!(points
            .iter()
            .all(|p| p.total_value.is_zero() && p.total_contributed.is_zero() && p.yield_to_date.is_zero()));
    }

    #[test]
    fn test_negative_rate() {
        let points = project(&[position(1000, 0, dec!(-12))], 1);
        let last = points.last().unwrap();

        assert!(last.yield_to_date.is_negative());
        assert_eq!(last.total_value, Money::from_units(880));
    }

    #[test]
    fn test_huge_horizon_is_capped() {
        let points = project(&[], i32::MAX);

        let last = points.last().unwrap();
        assert_eq!(last.month, (MAX_PROJECTION_YEARS as u32) * 12);
        assert_eq!(points.len(), (MAX_PROJECTION_YEARS as usize) * 4 + 1);
        assert!(last.total_value.is_zero());
    }

    #[test]
    fn test_project_team_rejects_huge_horizon() {
        let sources = InMemorySources::default();

        let err = project_team(&sources, TeamId::new(), i32::MAX).unwrap_err();
        assert!(err.is_validation());
        assert!(project_team(&sources, TeamId::new(), MAX_PROJECTION_YEARS).is_ok());
    }

    #[test]
    fn test_final_month_always_emitted() {
        // 12 * years is always a multiple of three, so the last point is quarterly too
        let points = project(&[position(100, 10, dec!(6))], 3);
        assert_eq!(points.last().unwrap().month, 36);
        assert_eq!(points.len(), 13);
    }

    #[test]
    fn test_project_team() {
        let team = TeamId::new();
        let mut mine = position(500, 50, dec!(10));
        mine.team_id = team;
        let sources = InMemorySources {
            investments: vec![mine, position(9999, 0, dec!(1))],
            ..Default::default()
        };

        let points = project_team(&sources, team, 0).unwrap();
        assert_eq!(points[0].total_value, Money::from_units(500));
    }
}
