//! Service layer for teamfin
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, permission checks and cross-entity operations.

pub mod budget;
pub mod expense;
pub mod investment;

pub use budget::{BudgetService, EnvelopeUpdate};
pub use expense::ExpenseService;
pub use investment::InvestmentService;
