//! Monthly budget model
//!
//! A `Budget` records the income a team declares for one calendar month.
//! There is at most one per `(team, month, year)`; a month without a record
//! is treated as zero income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TeamId};
use super::money::Money;
use super::period::MonthPeriod;

/// Declared income for one team and month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owning team
    pub team_id: TeamId,

    /// Calendar month (1-12)
    pub month: u32,

    /// Calendar year
    pub year: i32,

    /// Total income declared for the month
    pub total_income: Money,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget for a month
    pub fn new(team_id: TeamId, period: MonthPeriod, total_income: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            team_id,
            month: period.month(),
            year: period.year(),
            total_income,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the declared income
    pub fn set_income(&mut self, total_income: Money) {
        self.total_income = total_income;
        self.updated_at = Utc::now();
    }

    /// The uniqueness key of this budget
    pub fn key(&self) -> BudgetKey {
        BudgetKey {
            team_id: self.team_id,
            month: self.month,
            year: self.year,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }

        if self.total_income.is_negative() {
            return Err(BudgetValidationError::NegativeIncome);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02} income: {}",
            self.year, self.month, self.total_income
        )
    }
}

/// Composite key enforcing one budget per team and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub team_id: TeamId,
    pub month: u32,
    pub year: i32,
}

impl BudgetKey {
    pub fn new(team_id: TeamId, month: u32, year: i32) -> Self {
        Self {
            team_id,
            month,
            year,
        }
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    InvalidMonth(u32),
    NegativeIncome,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::NegativeIncome => write!(f, "Income cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn january() -> MonthPeriod {
        MonthPeriod::new(2025, 1).unwrap()
    }

    #[test]
    fn test_new_budget() {
        let team = TeamId::new();
        let budget = Budget::new(team, january(), Money::from_units(5000));

        assert_eq!(budget.month, 1);
        assert_eq!(budget.year, 2025);
        assert_eq!(budget.total_income, Money::from_units(5000));
        assert_eq!(budget.key(), BudgetKey::new(team, 1, 2025));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new(TeamId::new(), january(), Money::zero());
        assert!(budget.validate().is_ok());

        budget.set_income(Money::from_units(-1));
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeIncome));

        budget.set_income(Money::zero());
        budget.month = 13;
        assert_eq!(budget.validate(), Err(BudgetValidationError::InvalidMonth(13)));
    }

    #[test]
    fn test_display() {
        let budget = Budget::new(TeamId::new(), january(), Money::from_cents(123456));
        assert_eq!(budget.to_string(), "2025-01 income: R$ 1234.56");
    }
}
