//! Storage layer for teamfin
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. `Storage` implements every read capability in
//! [`crate::sources`], so reports can run directly against it.

pub mod budget;
pub mod categories;
pub mod envelopes;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod investments;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use envelopes::EnvelopeRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use investments::InvestmentRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::config::paths::TeamFinPaths;
use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{Budget, BudgetEnvelope, Expense, ExpenseCategory, Investment, TeamId};
use crate::sources::{BudgetSource, CategorySource, EnvelopeSource, ExpenseSource, InvestmentSource};

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> TeamFinResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| TeamFinError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> TeamFinResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| TeamFinError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TeamFinPaths,
    pub budgets: BudgetRepository,
    pub envelopes: EnvelopeRepository,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub investments: InvestmentRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TeamFinPaths) -> Result<Self, TeamFinError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            envelopes: EnvelopeRepository::new(paths.envelopes_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            investments: InvestmentRepository::new(paths.investments_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TeamFinPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TeamFinError> {
        self.budgets.load()?;
        self.envelopes.load()?;
        self.categories.load()?;
        self.expenses.load()?;
        self.investments.load()?;
        tracing::debug!(data_dir = %self.paths.data_dir().display(), "storage loaded");
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}

impl BudgetSource for Storage {
    fn budget_for(&self, team_id: TeamId, month: u32, year: i32) -> TeamFinResult<Option<Budget>> {
        self.budgets.get(team_id, month, year)
    }
}

impl EnvelopeSource for Storage {
    fn envelopes_for(&self, team_id: TeamId) -> TeamFinResult<Vec<BudgetEnvelope>> {
        self.envelopes.get_for_team(team_id)
    }
}

impl CategorySource for Storage {
    fn categories_for(&self, team_id: TeamId) -> TeamFinResult<Vec<ExpenseCategory>> {
        self.categories.get_for_team(team_id)
    }
}

impl ExpenseSource for Storage {
    fn expenses_between(
        &self,
        team_id: TeamId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TeamFinResult<Vec<Expense>> {
        self.expenses.get_in_range(team_id, start, end)
    }
}

impl InvestmentSource for Storage {
    fn investments_for(&self, team_id: TeamId) -> TeamFinResult<Vec<Investment>> {
        self.investments.get_for_team(team_id)
    }
}
