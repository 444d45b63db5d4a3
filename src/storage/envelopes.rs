//! Budget envelope repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TeamFinError;
use crate::models::{BudgetEnvelope, EnvelopeId, TeamId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    envelopes: Vec<BudgetEnvelope>,
}

/// Repository for envelope persistence
pub struct EnvelopeRepository {
    path: PathBuf,
    envelopes: RwLock<HashMap<EnvelopeId, BudgetEnvelope>>,
}

/// Creation order, then name, so reports list envelopes consistently
fn sort_envelopes(list: &mut [BudgetEnvelope]) {
    list.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}

impl EnvelopeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            envelopes: RwLock::new(HashMap::new()),
        }
    }

    /// Load envelopes from disk
    pub fn load(&self) -> Result<(), TeamFinError> {
        let file_data: EnvelopeData = read_json(&self.path)?;
        let mut envelopes = write_lock(&self.envelopes)?;

        envelopes.clear();
        for envelope in file_data.envelopes {
            envelopes.insert(envelope.id, envelope);
        }

        Ok(())
    }

    /// Save envelopes to disk
    pub fn save(&self) -> Result<(), TeamFinError> {
        let envelopes = read_lock(&self.envelopes)?;

        let mut list: Vec<_> = envelopes.values().cloned().collect();
        sort_envelopes(&mut list);

        write_json_atomic(&self.path, &EnvelopeData { envelopes: list })
    }

    /// Get an envelope by ID
    pub fn get(&self, id: EnvelopeId) -> Result<Option<BudgetEnvelope>, TeamFinError> {
        Ok(read_lock(&self.envelopes)?.get(&id).cloned())
    }

    /// Get a team's envelopes in creation order
    pub fn get_for_team(&self, team_id: TeamId) -> Result<Vec<BudgetEnvelope>, TeamFinError> {
        let envelopes = read_lock(&self.envelopes)?;

        let mut list: Vec<_> = envelopes
            .values()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect();
        sort_envelopes(&mut list);
        Ok(list)
    }

    /// Find a team's envelope by name (case-insensitive)
    pub fn get_by_name(
        &self,
        team_id: TeamId,
        name: &str,
    ) -> Result<Option<BudgetEnvelope>, TeamFinError> {
        let envelopes = read_lock(&self.envelopes)?;

        let name_lower = name.trim().to_lowercase();
        Ok(envelopes
            .values()
            .find(|e| e.team_id == team_id && e.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update an envelope
    pub fn upsert(&self, envelope: BudgetEnvelope) -> Result<(), TeamFinError> {
        write_lock(&self.envelopes)?.insert(envelope.id, envelope);
        Ok(())
    }

    /// Delete an envelope
    pub fn delete(&self, id: EnvelopeId) -> Result<bool, TeamFinError> {
        Ok(write_lock(&self.envelopes)?.remove(&id).is_some())
    }

    /// Count envelopes
    pub fn count(&self) -> Result<usize, TeamFinError> {
        Ok(read_lock(&self.envelopes)?.len())
    }
}
