//! Monthly budget repository for JSON storage
//!
//! Budgets are keyed by `(team, month, year)`; upserting a second budget for
//! the same key replaces the income of the existing record.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TeamFinError;
use crate::models::{Budget, BudgetKey, TeamId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for monthly budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), TeamFinError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = write_lock(&self.budgets)?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.key(), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TeamFinError> {
        let budgets = read_lock(&self.budgets)?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by_key(|b| (b.team_id.to_string(), b.year, b.month));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get the budget of a team for a month
    pub fn get(
        &self,
        team_id: TeamId,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>, TeamFinError> {
        let budgets = read_lock(&self.budgets)?;
        Ok(budgets.get(&BudgetKey::new(team_id, month, year)).cloned())
    }

    /// Get every budget of a team, oldest month first
    pub fn get_for_team(&self, team_id: TeamId) -> Result<Vec<Budget>, TeamFinError> {
        let budgets = read_lock(&self.budgets)?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.team_id == team_id)
            .cloned()
            .collect();
        list.sort_by_key(|b| (b.year, b.month));
        Ok(list)
    }

    /// Insert a budget, or update the income of the one already stored
    /// under the same `(team, month, year)` key. Returns the stored record.
    pub fn upsert(&self, budget: Budget) -> Result<Budget, TeamFinError> {
        let mut budgets = write_lock(&self.budgets)?;

        let stored = match budgets.get_mut(&budget.key()) {
            Some(existing) => {
                existing.set_income(budget.total_income);
                existing.clone()
            }
            None => {
                budgets.insert(budget.key(), budget.clone());
                budget
            }
        };

        Ok(stored)
    }

    /// Delete a team's budget for a month
    pub fn delete(&self, team_id: TeamId, month: u32, year: i32) -> Result<bool, TeamFinError> {
        let mut budgets = write_lock(&self.budgets)?;
        Ok(budgets.remove(&BudgetKey::new(team_id, month, year)).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, TeamFinError> {
        Ok(read_lock(&self.budgets)?.len())
    }
}
