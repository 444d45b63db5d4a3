//! Investment repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TeamFinError;
use crate::models::{Investment, InvestmentId, TeamId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct InvestmentData {
    #[serde(default)]
    investments: Vec<Investment>,
}

/// Repository for investment persistence
pub struct InvestmentRepository {
    path: PathBuf,
    investments: RwLock<HashMap<InvestmentId, Investment>>,
}

impl InvestmentRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            investments: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TeamFinError> {
        let file_data: InvestmentData = read_json(&self.path)?;
        let mut investments = write_lock(&self.investments)?;

        investments.clear();
        for investment in file_data.investments {
            investments.insert(investment.id, investment);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), TeamFinError> {
        let investments = read_lock(&self.investments)?;

        let mut list: Vec<_> = investments.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));

        write_json_atomic(&self.path, &InvestmentData { investments: list })
    }

    pub fn get(&self, id: InvestmentId) -> Result<Option<Investment>, TeamFinError> {
        Ok(read_lock(&self.investments)?.get(&id).cloned())
    }

    /// Get a team's positions sorted by name
    pub fn get_for_team(&self, team_id: TeamId) -> Result<Vec<Investment>, TeamFinError> {
        let investments = read_lock(&self.investments)?;

        let mut list: Vec<_> = investments
            .values()
            .filter(|i| i.team_id == team_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Find a team's position by name (case-insensitive)
    pub fn get_by_name(
        &self,
        team_id: TeamId,
        name: &str,
    ) -> Result<Option<Investment>, TeamFinError> {
        let investments = read_lock(&self.investments)?;

        let name_lower = name.trim().to_lowercase();
        Ok(investments
            .values()
            .find(|i| i.team_id == team_id && i.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn upsert(&self, investment: Investment) -> Result<(), TeamFinError> {
        write_lock(&self.investments)?.insert(investment.id, investment);
        Ok(())
    }

    pub fn delete(&self, id: InvestmentId) -> Result<bool, TeamFinError> {
        Ok(write_lock(&self.investments)?.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, TeamFinError> {
        Ok(read_lock(&self.investments)?.len())
    }
}
