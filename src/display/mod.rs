//! Display formatting for terminal output
//!
//! Plain-text tables for budgets, expenses, investments and reports.

pub mod budget;
pub mod ledger;
pub mod report;

pub use budget::{format_budget, format_category_tree, format_envelope_list};
pub use ledger::{format_expense_list, format_investment_list};
pub use report::{render_classification_summary, render_dashboard, render_projection};
