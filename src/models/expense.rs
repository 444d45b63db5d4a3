//! Expense model
//!
//! An expense is a positive amount spent by a team on a given instant,
//! optionally tagged with an expense category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, TeamId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Owning team
    pub team_id: TeamId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// When the money was spent
    pub date: DateTime<Utc>,

    /// Optional category tag
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create an uncategorized expense
    pub fn new(team_id: TeamId, amount: Money, date: DateTime<Utc>) -> Self {
        Self {
            id: ExpenseId::new(),
            team_id,
            amount,
            date,
            category_id: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        if self.description.len() > 200 {
            return Err(ExpenseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.amount)?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be positive"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
