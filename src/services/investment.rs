//! Investment service

use rust_decimal::Decimal;

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{Investment, InvestmentId, Money, TeamId};
use crate::storage::Storage;

/// Service for investment positions
pub struct InvestmentService<'a> {
    storage: &'a Storage,
}

impl<'a> InvestmentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a position. Amounts must not be negative; the return rate may be.
    pub fn add(
        &self,
        team_id: TeamId,
        name: &str,
        current_amount: Money,
        monthly_contribution: Money,
        annual_return_rate: Decimal,
    ) -> TeamFinResult<Investment> {
        let name = name.trim();
        if self.storage.investments.get_by_name(team_id, name)?.is_some() {
            return Err(TeamFinError::Duplicate {
                entity_type: "Investment",
                identifier: name.to_string(),
            });
        }

        let investment = Investment::new(
            team_id,
            name,
            current_amount,
            monthly_contribution,
            annual_return_rate,
        );
        investment
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        self.storage.investments.upsert(investment.clone())?;
        self.storage.investments.save()?;

        tracing::info!(team = %team_id, investment = %investment.name, "investment added");
        Ok(investment)
    }

    /// A team's positions sorted by name
    pub fn list(&self, team_id: TeamId) -> TeamFinResult<Vec<Investment>> {
        self.storage.investments.get_for_team(team_id)
    }

    /// Find a position by name or ID string
    pub fn find(&self, team_id: TeamId, identifier: &str) -> TeamFinResult<Option<Investment>> {
        if let Some(investment) = self.storage.investments.get_by_name(team_id, identifier)? {
            return Ok(Some(investment));
        }

        if let Ok(id) = identifier.parse::<InvestmentId>() {
            return Ok(self
                .storage
                .investments
                .get(id)?
                .filter(|i| i.team_id == team_id));
        }

        Ok(None)
    }

    pub fn remove(&self, team_id: TeamId, id: InvestmentId) -> TeamFinResult<Investment> {
        let investment = self
            .storage
            .investments
            .get(id)?
            .filter(|i| i.team_id == team_id)
            .ok_or_else(|| TeamFinError::investment_not_found(id.to_string()))?;

        self.storage.investments.delete(id)?;
        self.storage.investments.save()?;

        tracing::info!(team = %team_id, investment = %investment.name, "investment removed");
        Ok(investment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TeamFinPaths;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TeamFinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_find_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InvestmentService::new(&storage);
        let team = TeamId::new();

        let added = service
            .add(team, "Tesouro Selic", Money::from_units(5000), Money::from_units(300), dec!(10.75))
            .unwrap();
        assert!(service
            .add(team, "tesouro selic", Money::zero(), Money::zero(), dec!(1))
            .is_err());

        let found = service.find(team, "TESOURO SELIC").unwrap().unwrap();
        assert_eq!(found.id, added.id);
        assert_eq!(service.list(team).unwrap().len(), 1);

        service.remove(team, added.id).unwrap();
        assert!(service.list(team).unwrap().is_empty());
        assert!(service.remove(team, added.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_negative_amounts_rejected_negative_rate_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = InvestmentService::new(&storage);
        let team = TeamId::new();

        assert!(service
            .add(team, "A", Money::from_units(-1), Money::zero(), dec!(5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(team, "B", Money::zero(), Money::from_units(-1), dec!(5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(team, "C", Money::from_units(100), Money::zero(), dec!(-3))
            .is_ok());
    }
}
