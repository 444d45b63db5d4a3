//! Read-only data capabilities consumed by the reporting engine
//!
//! Each trait covers one narrow fetch. Reports take them as generic
//! parameters so they can run against the JSON `Storage` or against
//! `InMemorySources` fixtures without touching disk.

use chrono::{DateTime, Utc};

use crate::error::TeamFinResult;
use crate::models::{Budget, BudgetEnvelope, Expense, ExpenseCategory, Investment, TeamId};

/// Fetch the declared income record of a month
pub trait BudgetSource {
    fn budget_for(&self, team_id: TeamId, month: u32, year: i32) -> TeamFinResult<Option<Budget>>;
}

/// Fetch a team's envelopes in a stable order
pub trait EnvelopeSource {
    fn envelopes_for(&self, team_id: TeamId) -> TeamFinResult<Vec<BudgetEnvelope>>;
}

/// Fetch a team's expense categories
pub trait CategorySource {
    fn categories_for(&self, team_id: TeamId) -> TeamFinResult<Vec<ExpenseCategory>>;
}

/// Fetch a team's expenses dated within `[start, end]`, both inclusive
pub trait ExpenseSource {
    fn expenses_between(
        &self,
        team_id: TeamId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TeamFinResult<Vec<Expense>>;
}

/// Fetch a team's investment positions
pub trait InvestmentSource {
    fn investments_for(&self, team_id: TeamId) -> TeamFinResult<Vec<Investment>>;
}

/// Everything a period summary reads
pub trait PeriodSources: BudgetSource + EnvelopeSource + CategorySource + ExpenseSource {}

impl<T> PeriodSources for T where T: BudgetSource + EnvelopeSource + CategorySource + ExpenseSource {}

/// Plain in-memory collections implementing every source trait
#[derive(Debug, Clone, Default)]
pub struct InMemorySources {
    pub budgets: Vec<Budget>,
    pub envelopes: Vec<BudgetEnvelope>,
    pub categories: Vec<ExpenseCategory>,
    pub expenses: Vec<Expense>,
    pub investments: Vec<Investment>,
}

impl BudgetSource for InMemorySources {
    fn budget_for(&self, team_id: TeamId, month: u32, year: i32) -> TeamFinResult<Option<Budget>> {
        Ok(self
            .budgets
            .iter()
            .find(|b| b.team_id == team_id && b.month == month && b.year == year)
            .cloned())
    }
}

impl EnvelopeSource for InMemorySources {
    fn envelopes_for(&self, team_id: TeamId) -> TeamFinResult<Vec<BudgetEnvelope>> {
        Ok(self
            .envelopes
            .iter()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect())
    }
}

impl CategorySource for InMemorySources {
    fn categories_for(&self, team_id: TeamId) -> TeamFinResult<Vec<ExpenseCategory>> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.team_id == team_id)
            .cloned()
            .collect())
    }
}

impl ExpenseSource for InMemorySources {
    fn expenses_between(
        &self,
        team_id: TeamId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TeamFinResult<Vec<Expense>> {
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.team_id == team_id && e.date >= start && e.date <= end)
            .cloned()
            .collect())
    }
}

impl InvestmentSource for InMemorySources {
    fn investments_for(&self, team_id: TeamId) -> TeamFinResult<Vec<Investment>> {
        Ok(self
            .investments
            .iter()
            .filter(|i| i.team_id == team_id)
            .cloned()
            .collect())
    }
}
