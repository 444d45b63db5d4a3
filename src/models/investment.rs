//! Investment position model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{InvestmentId, TeamId};
use super::money::Money;

/// An investment position tracked by a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique identifier
    pub id: InvestmentId,

    /// Owning team
    pub team_id: TeamId,

    /// Position name ("Tesouro Selic", "CDB")
    pub name: String,

    /// Value of the position today
    pub current_amount: Money,

    /// Amount added every month
    #[serde(default)]
    pub monthly_contribution: Money,

    /// Expected yearly return in percent (8.5 = 8.5% a year); may be negative
    pub annual_return_rate: Decimal,

    /// When the position was registered
    pub created_at: DateTime<Utc>,
}

impl Investment {
    pub fn new(
        team_id: TeamId,
        name: impl Into<String>,
        current_amount: Money,
        monthly_contribution: Money,
        annual_return_rate: Decimal,
    ) -> Self {
        Self {
            id: InvestmentId::new(),
            team_id,
            name: name.into(),
            current_amount,
            monthly_contribution,
            annual_return_rate,
            created_at: Utc::now(),
        }
    }

    /// Monthly rate as a fraction: `annual_return_rate / 100 / 12`
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_return_rate / Decimal::ONE_HUNDRED / Decimal::from(12)
    }

    /// Validate the position
    ///
    /// Negative return rates are accepted.
    pub fn validate(&self) -> Result<(), InvestmentValidationError> {
        if self.name.trim().is_empty() {
            return Err(InvestmentValidationError::EmptyName);
        }

        if self.current_amount.is_negative() {
            return Err(InvestmentValidationError::NegativeAmount);
        }

        if self.monthly_contribution.is_negative() {
            return Err(InvestmentValidationError::NegativeContribution);
        }

        Ok(())
    }
}

impl fmt::Display for Investment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (+{}/month @ {}%/yr)",
            self.name,
            self.current_amount,
            self.monthly_contribution,
            self.annual_return_rate.normalize()
        )
    }
}

/// Validation errors for investments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestmentValidationError {
    EmptyName,
    NegativeAmount,
    NegativeContribution,
}

impl fmt::Display for InvestmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Investment name cannot be empty"),
            Self::NegativeAmount => write!(f, "Current amount cannot be negative"),
            Self::NegativeContribution => write!(f, "Monthly contribution cannot be negative"),
        }
    }
}

impl std::error::Error for InvestmentValidationError {}
