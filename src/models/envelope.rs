//! Budget envelope model
//!
//! An envelope ("pasta") is a named bucket that receives a fixed fraction of
//! the team's declared income each month. Fractions are stored per envelope
//! and are not required to add up to one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{EnvelopeId, TeamId};

/// Fixed taxonomy used to group envelopes in the period summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Needs,
    Wants,
    Savings,
    #[default]
    Other,
}

impl Classification {
    /// All classifications in display order
    pub fn all() -> &'static [Self] {
        &[Self::Needs, Self::Wants, Self::Savings, Self::Other]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needs => "needs",
            Self::Wants => "wants",
            Self::Savings => "savings",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = EnvelopeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "needs" | "need" => Ok(Self::Needs),
            "wants" | "want" => Ok(Self::Wants),
            "savings" | "saving" => Ok(Self::Savings),
            "other" => Ok(Self::Other),
            other => Err(EnvelopeValidationError::UnknownClassification(
                other.to_string(),
            )),
        }
    }
}

/// A percentage-of-income budget envelope owned by one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEnvelope {
    /// Unique identifier
    pub id: EnvelopeId,

    /// Owning team
    pub team_id: TeamId,

    /// Envelope name
    pub name: String,

    /// Fraction of income (0.25 = 25%)
    pub percentage: Decimal,

    /// Taxonomy bucket for the classification summary
    #[serde(default)]
    pub classification: Classification,

    /// When the envelope was created
    pub created_at: DateTime<Utc>,

    /// When the envelope was last modified
    pub updated_at: DateTime<Utc>,
}

impl BudgetEnvelope {
    /// Create a new envelope
    pub fn new(team_id: TeamId, name: impl Into<String>, percentage: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: EnvelopeId::new(),
            team_id,
            name: name.into(),
            percentage,
            classification: Classification::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style classification setter
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Change the income fraction
    pub fn set_percentage(&mut self, percentage: Decimal) {
        self.percentage = percentage;
        self.updated_at = Utc::now();
    }

    /// Rename the envelope
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate a single envelope
    ///
    /// Only the envelope itself is checked; the sum across a team's
    /// envelopes is never constrained.
    pub fn validate(&self) -> Result<(), EnvelopeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EnvelopeValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(EnvelopeValidationError::NameTooLong(self.name.len()));
        }

        if self.percentage < Decimal::ZERO || self.percentage > Decimal::ONE {
            return Err(EnvelopeValidationError::PercentageOutOfRange(self.percentage));
        }

        Ok(())
    }
}

impl fmt::Display for BudgetEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}%)",
            self.name,
            (self.percentage * Decimal::ONE_HUNDRED).normalize()
        )
    }
}

/// Envelopes created for a fresh team (the 50/30/20 rule)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultEnvelope {
    Essentials,
    Lifestyle,
    Investments,
}

impl DefaultEnvelope {
    pub fn all() -> &'static [Self] {
        &[Self::Essentials, Self::Lifestyle, Self::Investments]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Essentials => "Essenciais",
            Self::Lifestyle => "Estilo de Vida",
            Self::Investments => "Investimentos",
        }
    }

    pub fn percentage(&self) -> Decimal {
        match self {
            Self::Essentials => Decimal::new(50, 2),
            Self::Lifestyle => Decimal::new(30, 2),
            Self::Investments => Decimal::new(20, 2),
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            Self::Essentials => Classification::Needs,
            Self::Lifestyle => Classification::Wants,
            Self::Investments => Classification::Savings,
        }
    }

    pub fn to_envelope(&self, team_id: TeamId) -> BudgetEnvelope {
        BudgetEnvelope::new(team_id, self.name(), self.percentage())
            .with_classification(self.classification())
    }
}

/// Validation errors for envelopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeValidationError {
    EmptyName,
    NameTooLong(usize),
    PercentageOutOfRange(Decimal),
    UnknownClassification(String),
}

impl fmt::Display for EnvelopeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Envelope name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Envelope name too long ({} chars, max 50)", len)
            }
            Self::PercentageOutOfRange(p) => {
                write!(f, "Envelope percentage must be between 0 and 1, got {}", p)
            }
            Self::UnknownClassification(s) => write!(
                f,
                "Unknown classification '{}' (expected needs, wants, savings or other)",
                s
            ),
        }
    }
}

impl std::error::Error for EnvelopeValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_envelope() {
        let team = TeamId::new();
        let envelope = BudgetEnvelope::new(team, "Moradia", dec!(0.35));

        assert_eq!(envelope.team_id, team);
        assert_eq!(envelope.name, "Moradia");
        assert_eq!(envelope.percentage, dec!(0.35));
        assert_eq!(envelope.classification, Classification::Other);
        assert_eq!(envelope.to_string(), "Moradia (35%)");
    }

    #[test]
    fn test_validation() {
        let mut envelope = BudgetEnvelope::new(TeamId::new(), "Lazer", dec!(0.2));
        assert!(envelope.validate().is_ok());

        envelope.set_percentage(dec!(1.5));
        assert_eq!(
            envelope.validate(),
            Err(EnvelopeValidationError::PercentageOutOfRange(dec!(1.5)))
        );

        envelope.set_percentage(dec!(0));
        envelope.rename("  ");
        assert_eq!(envelope.validate(), Err(EnvelopeValidationError::EmptyName));
    }

    #[test]
    fn test_classification_parse() {
        assert_eq!("Needs".parse::<Classification>().unwrap(), Classification::Needs);
        assert_eq!("saving".parse::<Classification>().unwrap(), Classification::Savings);
        assert!("luxury".parse::<Classification>().is_err());
    }

    #[test]
    fn test_default_envelopes_follow_50_30_20() {
        let team = TeamId::new();
        let envelopes: Vec<_> = DefaultEnvelope::all()
            .iter()
            .map(|d| d.to_envelope(team))
            .collect();

        let total: Decimal = envelopes.iter().map(|e| e.percentage).sum();
        assert_eq!(total, dec!(1.00));
        assert_eq!(envelopes[0].classification, Classification::Needs);
        assert_eq!(envelopes[2].classification, Classification::Savings);
    }

    #[test]
    fn test_classification_defaults_when_missing() {
        let envelope = BudgetEnvelope::new(TeamId::new(), "Mercado", dec!(0.1));
        let mut value = serde_json::to_value(&envelope).unwrap();
        value.as_object_mut().unwrap().remove("classification");

        let back: BudgetEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(back.classification, Classification::Other);
        assert_eq!(back.percentage, dec!(0.1));
    }
}
