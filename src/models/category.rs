//! Expense category model
//!
//! Categories label expenses ("Mercado", "Aluguel"). A category may point at
//! an envelope through an optional id; the link is a lookup only and never
//! owns the envelope, so deleting an envelope just leaves categories unlinked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, EnvelopeId, TeamId};

/// Name reports give to spend without a category; no real category may use it
pub const UNCATEGORIZED_NAME: &str = "Sem Categoria";

/// An expense category, optionally linked to a budget envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Unique identifier
    pub id: CategoryId,

    /// Owning team
    pub team_id: TeamId,

    /// Category name
    pub name: String,

    /// Envelope this category's spending counts against, if any
    #[serde(default)]
    pub envelope_id: Option<EnvelopeId>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl ExpenseCategory {
    /// Create an unlinked category
    pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            team_id,
            name: name.into(),
            envelope_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category linked to an envelope
    pub fn linked(team_id: TeamId, name: impl Into<String>, envelope_id: EnvelopeId) -> Self {
        let mut category = Self::new(team_id, name);
        category.envelope_id = Some(envelope_id);
        category
    }

    /// Point this category at an envelope, or clear the link with `None`
    pub fn link_to(&mut self, envelope_id: Option<EnvelopeId>) {
        self.envelope_id = envelope_id;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.name.trim().eq_ignore_ascii_case(UNCATEGORIZED_NAME) {
            return Err(CategoryValidationError::ReservedName(self.name.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    ReservedName(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::ReservedName(name) => write!(f, "Category name is reserved: {}", name),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_is_unlinked() {
        let category = ExpenseCategory::new(TeamId::new(), "Mercado");
        assert_eq!(category.name, "Mercado");
        assert!(category.envelope_id.is_none());
    }

    #[test]
    fn test_link_and_unlink() {
        let team = TeamId::new();
        let envelope = EnvelopeId::new();
        let mut category = ExpenseCategory::linked(team, "Aluguel", envelope);
        assert_eq!(category.envelope_id, Some(envelope));

        category.link_to(None);
        assert!(category.envelope_id.is_none());
    }

    #[test]
    fn test_validation() {
        let mut category = ExpenseCategory::new(TeamId::new(), "Valid");
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );

        category.name = "sem categoria".into();
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::ReservedName("sem categoria".into()))
        );
    }
}
