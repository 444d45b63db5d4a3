//! Expense category repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TeamFinError;
use crate::models::{CategoryId, EnvelopeId, ExpenseCategory, TeamId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

/// Serializable category data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub categories: Vec<ExpenseCategory>,
}

/// Repository for expense category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, ExpenseCategory>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), TeamFinError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut categories = write_lock(&self.categories)?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), TeamFinError> {
        let categories = read_lock(&self.categories)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<ExpenseCategory>, TeamFinError> {
        Ok(read_lock(&self.categories)?.get(&id).cloned())
    }

    /// Get a team's categories sorted by name
    pub fn get_for_team(&self, team_id: TeamId) -> Result<Vec<ExpenseCategory>, TeamFinError> {
        let categories = read_lock(&self.categories)?;

        let mut list: Vec<_> = categories
            .values()
            .filter(|c| c.team_id == team_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Find a team's category by name (case-insensitive)
    pub fn get_by_name(
        &self,
        team_id: TeamId,
        name: &str,
    ) -> Result<Option<ExpenseCategory>, TeamFinError> {
        let categories = read_lock(&self.categories)?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.team_id == team_id && c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: ExpenseCategory) -> Result<(), TeamFinError> {
        write_lock(&self.categories)?.insert(category.id, category);
        Ok(())
    }

    /// Clear the link of every category pointing at an envelope.
    /// Returns how many categories were unlinked.
    pub fn unlink_envelope(&self, envelope_id: EnvelopeId) -> Result<usize, TeamFinError> {
        let mut categories = write_lock(&self.categories)?;

        let mut unlinked = 0;
        for category in categories
            .values_mut()
            .filter(|c| c.envelope_id == Some(envelope_id))
        {
            category.link_to(None);
            unlinked += 1;
        }

        Ok(unlinked)
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, TeamFinError> {
        Ok(write_lock(&self.categories)?.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, TeamFinError> {
        Ok(read_lock(&self.categories)?.len())
    }
}
