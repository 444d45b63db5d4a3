//! Envelope allocation
//!
//! Splits a month's declared income across percentage envelopes. The result
//! rows start with nothing spent; reconciliation fills that in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BudgetEnvelope, EnvelopeId, Money};

/// Budget vs. spend for one envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeReport {
    pub envelope_id: EnvelopeId,
    pub name: String,
    /// Fraction of income, 0.35 for 35%
    pub percentage: Decimal,
    pub budgeted: Money,
    pub spent: Money,
}

impl EnvelopeReport {
    /// Budgeted minus spent; negative when overspent
    pub fn remaining(&self) -> Money {
        self.budgeted - self.spent
    }

    pub fn is_overspent(&self) -> bool {
        self.spent > self.budgeted
    }

    /// Spent as a fraction of budgeted, `None` when nothing was budgeted
    pub fn usage(&self) -> Option<Decimal> {
        if self.budgeted.is_positive() {
            Some(self.spent.amount() / self.budgeted.amount())
        } else {
            None
        }
    }
}

/// Amount of `total_income` an envelope with `percentage` receives.
///
/// Unrounded. Zero or negative income budgets nothing. Every view that shows
/// a budgeted figure goes through here so they always agree.
pub fn budgeted_amount(total_income: Money, percentage: Decimal) -> Money {
    if total_income.is_positive() {
        total_income.scale(percentage)
    } else {
        Money::zero()
    }
}

/// One report per envelope, in input order, with `spent` at zero.
///
/// Percentages are taken as given: they may sum to less or more than one.
pub fn allocate(total_income: Money, envelopes: &[BudgetEnvelope]) -> Vec<EnvelopeReport> {
    envelopes
        .iter()
        .map(|envelope| EnvelopeReport {
            envelope_id: envelope.id,
            name: envelope.name.clone(),
            percentage: envelope.percentage,
            budgeted: budgeted_amount(total_income, envelope.percentage),
            spent: Money::zero(),
        })
        .collect()
}
