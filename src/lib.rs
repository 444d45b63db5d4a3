//! teamfin - shared household budgeting
//!
//! A team declares its monthly income, splits it across percentage
//! envelopes, records expenses against expense categories and tracks
//! investment positions. The reporting engine turns that data into monthly
//! dashboards and long-horizon investment projections.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (budgets, envelopes, expenses, investments)
//! - `sources`: Read-only capabilities the reporting engine consumes
//! - `storage`: JSON file storage layer
//! - `permissions`: Gate consulted before budget mutations
//! - `logging`: `tracing` subscriber setup for the binary
//! - `services`: Business logic layer
//! - `reports`: Allocation, reconciliation, summaries and projections
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `teamfin` binary
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use teamfin::models::{BudgetEnvelope, Money, TeamId};
//! use teamfin::reports::allocate;
//!
//! let team = TeamId::new();
//! let envelopes = vec![BudgetEnvelope::new(team, "Moradia", Decimal::new(5, 1))];
//! let reports = allocate(Money::from_units(1000), &envelopes);
//! assert_eq!(reports[0].budgeted, Money::from_units(500));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod permissions;
pub mod reports;
pub mod services;
pub mod sources;
pub mod storage;

pub use error::{TeamFinError, TeamFinResult};
