//! Expense reconciliation
//!
//! Matches a period's expenses against the allocated envelopes. Spend reaches
//! an envelope only through its category's link; everything else stays
//! visible in the per-category breakdown and the grand total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, EnvelopeId, Expense, ExpenseCategory, Money};

use super::allocation::EnvelopeReport;

/// Breakdown key for expenses without a resolvable category
pub const UNCATEGORIZED_LABEL: &str = crate::models::category::UNCATEGORIZED_NAME;

/// Envelope label for categories not linked to a known envelope
pub const NO_ENVELOPE_LABEL: &str = "Sem Pasta";

/// Spend of one category within the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_name: String,
    pub amount: Money,
    pub envelope_name: String,
}

/// Result of reconciling expenses against envelope reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub envelopes: Vec<EnvelopeReport>,
    /// Ordered by amount descending, then category name, then envelope name
    pub breakdown: Vec<CategoryBreakdown>,
    pub total_spent: Money,
}

impl Reconciliation {
    /// Spend that did not land in any envelope
    pub fn unallocated(&self) -> Money {
        let allocated: Money = self.envelopes.iter().map(|e| e.spent).sum();
        self.total_spent - allocated
    }
}

/// Resolves an expense's optional category reference
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    categories: HashMap<CategoryId, ExpenseCategory>,
}

impl CategoryResolver {
    pub fn new(categories: &[ExpenseCategory]) -> Self {
        Self {
            categories: categories.iter().map(|c| (c.id, c.clone())).collect(),
        }
    }

    /// The category behind `category_id`, if it names a known one
    pub fn resolve(&self, category_id: Option<CategoryId>) -> Option<&ExpenseCategory> {
        category_id.and_then(|id| self.categories.get(&id))
    }

    /// The envelope an expense's category is linked to
    pub fn envelope_of(&self, category_id: Option<CategoryId>) -> Option<EnvelopeId> {
        self.resolve(category_id).and_then(|c| c.envelope_id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Add `expenses` to `reports` and build the category breakdown.
///
/// The input order of expenses has no effect on the result.
pub fn reconcile(
    expenses: &[Expense],
    resolver: &CategoryResolver,
    mut reports: Vec<EnvelopeReport>,
) -> Reconciliation {
    let slots: HashMap<EnvelopeId, usize> = reports
        .iter()
        .enumerate()
        .map(|(idx, report)| (report.envelope_id, idx))
        .collect();

    // `None` is the uncategorized bucket; a real category never shares it,
    // whatever its name.
    let mut buckets: HashMap<Option<CategoryId>, CategoryBreakdown> = HashMap::new();
    let mut total_spent = Money::zero();

    for expense in expenses {
        total_spent += expense.amount;

        let category = resolver.resolve(expense.category_id);
        let slot = category
            .and_then(|c| c.envelope_id)
            .and_then(|id| slots.get(&id).copied());

        if let Some(idx) = slot {
            reports[idx].spent += expense.amount;
        }

        let category_name = category
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
        let envelope_name = slot
            .map(|idx| reports[idx].name.clone())
            .unwrap_or_else(|| NO_ENVELOPE_LABEL.to_string());

        buckets
            .entry(category.map(|c| c.id))
            .or_insert_with(|| CategoryBreakdown {
                category_name,
                amount: Money::zero(),
                envelope_name,
            })
            .amount += expense.amount;
    }

    let mut breakdown: Vec<_> = buckets.into_values().collect();
    breakdown.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.envelope_name.cmp(&b.envelope_name))
    });

    Reconciliation {
        envelopes: reports,
        breakdown,
        total_spent,
    }
}
