//! Core data models for teamfin
//!
//! This module contains the records a team keeps: monthly budgets,
//! percentage envelopes, expense categories, expenses and investments.

pub mod budget;
pub mod category;
pub mod envelope;
pub mod expense;
pub mod ids;
pub mod investment;
pub mod money;
pub mod period;

pub use budget::{Budget, BudgetKey};
pub use category::ExpenseCategory;
pub use envelope::{BudgetEnvelope, Classification, DefaultEnvelope};
pub use expense::Expense;
pub use ids::{BudgetId, CategoryId, EnvelopeId, ExpenseId, InvestmentId, MemberId, TeamId};
pub use investment::Investment;
pub use money::Money;
pub use period::{MonthPeriod, MonthWindow};
