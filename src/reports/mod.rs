//! Reporting engine for teamfin
//!
//! Pure computations over data fetched through [`crate::sources`]:
//! envelope allocation, expense reconciliation, monthly summaries and
//! investment projection. Nothing here writes to storage or caches results.

pub mod allocation;
pub mod dashboard;
pub mod projection;
pub mod reconciliation;

pub use allocation::{allocate, budgeted_amount, EnvelopeReport};
pub use dashboard::{
    summarize, summarize_by_classification, ClassificationSummary, ClassificationTotal,
    DashboardAggregate, EnvelopeSummary,
};
pub use projection::{month_label, project, project_team, ProjectionPoint, MAX_PROJECTION_YEARS};
pub use reconciliation::{
    reconcile, CategoryBreakdown, CategoryResolver, Reconciliation, NO_ENVELOPE_LABEL,
    UNCATEGORIZED_LABEL,
};
