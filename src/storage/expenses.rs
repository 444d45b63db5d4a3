//! Expense repository for JSON storage
//!
//! Keeps a per-team index next to the main map so month queries only scan
//! one team's expenses.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::TeamFinError;
use crate::models::{CategoryId, Expense, ExpenseId, TeamId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    by_team: RwLock<HashMap<TeamId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_team: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the team index
    pub fn load(&self) -> Result<(), TeamFinError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        let mut by_team = write_lock(&self.by_team)?;

        data.clear();
        by_team.clear();
        for expense in file_data.expenses {
            by_team.entry(expense.team_id).or_default().push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk, oldest first
    pub fn save(&self) -> Result<(), TeamFinError> {
        let data = read_lock(&self.data)?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &ExpenseData { expenses: list })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TeamFinError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Get all expenses of a team, oldest first
    pub fn get_for_team(&self, team_id: TeamId) -> Result<Vec<Expense>, TeamFinError> {
        self.collect_for_team(team_id, |_| true)
    }

    /// Get a team's expenses dated within `[start, end]`, both ends inclusive
    pub fn get_in_range(
        &self,
        team_id: TeamId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Expense>, TeamFinError> {
        self.collect_for_team(team_id, |e| e.date >= start && e.date <= end)
    }

    /// Get a team's expenses tagged with a category
    pub fn get_by_category(
        &self,
        team_id: TeamId,
        category_id: CategoryId,
    ) -> Result<Vec<Expense>, TeamFinError> {
        self.collect_for_team(team_id, |e| e.category_id == Some(category_id))
    }

    fn collect_for_team<F>(&self, team_id: TeamId, keep: F) -> Result<Vec<Expense>, TeamFinError>
    where
        F: Fn(&Expense) -> bool,
    {
        let data = read_lock(&self.data)?;
        let by_team = read_lock(&self.by_team)?;

        let mut list: Vec<_> = by_team
            .get(&team_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| data.get(id))
                    .filter(|&e| keep(e))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), TeamFinError> {
        let mut data = write_lock(&self.data)?;
        let mut by_team = write_lock(&self.by_team)?;

        if let Some(old) = data.get(&expense.id) {
            if old.team_id != expense.team_id {
                if let Some(ids) = by_team.get_mut(&old.team_id) {
                    ids.retain(|id| *id != expense.id);
                }
            }
        }

        let ids = by_team.entry(expense.team_id).or_default();
        if !ids.contains(&expense.id) {
            ids.push(expense.id);
        }
        data.insert(expense.id, expense);

        Ok(())
    }

    /// Clear the category of every expense tagged with it
    pub fn clear_category(&self, category_id: CategoryId) -> Result<usize, TeamFinError> {
        let mut data = write_lock(&self.data)?;

        let mut cleared = 0;
        for expense in data
            .values_mut()
            .filter(|e| e.category_id == Some(category_id))
        {
            expense.category_id = None;
            cleared += 1;
        }

        Ok(cleared)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, TeamFinError> {
        let mut data = write_lock(&self.data)?;
        let mut by_team = write_lock(&self.by_team)?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_team.get_mut(&expense.team_id) {
                    ids.retain(|existing| *existing != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, TeamFinError> {
        Ok(read_lock(&self.data)?.len())
    }
}
