//! Budget service
//!
//! Monthly income, envelopes and expense categories of a team. Every
//! mutation asks the permission gate first.

use rust_decimal::Decimal;

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{
    Budget, BudgetEnvelope, CategoryId, Classification, EnvelopeId, ExpenseCategory, MemberId,
    Money, MonthPeriod, TeamId,
};
use crate::permissions::PermissionGate;
use crate::storage::Storage;

/// Changes applied by [`BudgetService::update_envelope`]
#[derive(Debug, Clone, Default)]
pub struct EnvelopeUpdate {
    pub name: Option<String>,
    pub percentage: Option<Decimal>,
    pub classification: Option<Classification>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    gate: &'a dyn PermissionGate,
    member: MemberId,
}

impl<'a> BudgetService<'a> {
    /// Create a budget service acting as `member`
    pub fn new(storage: &'a Storage, gate: &'a dyn PermissionGate, member: MemberId) -> Self {
        Self {
            storage,
            gate,
            member,
        }
    }

    fn authorize(&self, team_id: TeamId, action: &'static str) -> TeamFinResult<()> {
        if self.gate.can_manage_budget(team_id, self.member) {
            Ok(())
        } else {
            tracing::warn!(team = %team_id, member = %self.member, action, "permission denied");
            Err(TeamFinError::PermissionDenied {
                action,
                team: team_id,
            })
        }
    }

    // === Income ===

    /// Declare the team's income for a month, replacing any previous value
    pub fn set_income(
        &self,
        team_id: TeamId,
        period: MonthPeriod,
        total_income: Money,
    ) -> TeamFinResult<Budget> {
        self.authorize(team_id, "set income")?;

        let budget = Budget::new(team_id, period, total_income);
        budget
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        let stored = self.storage.budgets.upsert(budget)?;
        self.storage.budgets.save()?;

        tracing::info!(team = %team_id, %period, income = %stored.total_income, "income set");
        Ok(stored)
    }

    /// The budget record of a month, if income was declared
    pub fn get_budget(&self, team_id: TeamId, period: MonthPeriod) -> TeamFinResult<Option<Budget>> {
        self.storage
            .budgets
            .get(team_id, period.month(), period.year())
    }

    // === Envelopes ===

    /// Create an envelope
    pub fn add_envelope(
        &self,
        team_id: TeamId,
        name: &str,
        percentage: Decimal,
        classification: Classification,
    ) -> TeamFinResult<BudgetEnvelope> {
        self.authorize(team_id, "add envelopes")?;

        let name = name.trim();
        if self.storage.envelopes.get_by_name(team_id, name)?.is_some() {
            return Err(TeamFinError::Duplicate {
                entity_type: "Envelope",
                identifier: name.to_string(),
            });
        }

        let envelope =
            BudgetEnvelope::new(team_id, name, percentage).with_classification(classification);
        envelope
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        self.storage.envelopes.upsert(envelope.clone())?;
        self.storage.envelopes.save()?;

        tracing::info!(team = %team_id, envelope = %envelope.name, "envelope added");
        Ok(envelope)
    }

    /// Rename, re-weight or reclassify an envelope
    pub fn update_envelope(
        &self,
        team_id: TeamId,
        id: EnvelopeId,
        update: EnvelopeUpdate,
    ) -> TeamFinResult<BudgetEnvelope> {
        self.authorize(team_id, "edit envelopes")?;

        let mut envelope = self.require_envelope(team_id, id)?;

        if let Some(name) = update.name {
            let name = name.trim();
            if let Some(existing) = self.storage.envelopes.get_by_name(team_id, name)? {
                if existing.id != id {
                    return Err(TeamFinError::Duplicate {
                        entity_type: "Envelope",
                        identifier: name.to_string(),
                    });
                }
            }
            envelope.rename(name);
        }
        if let Some(percentage) = update.percentage {
            envelope.set_percentage(percentage);
        }
        if let Some(classification) = update.classification {
            envelope.classification = classification;
        }

        envelope
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        self.storage.envelopes.upsert(envelope.clone())?;
        self.storage.envelopes.save()?;

        tracing::info!(team = %team_id, envelope = %envelope.name, "envelope updated");
        Ok(envelope)
    }

    /// Delete an envelope and unlink the categories that pointed at it.
    /// Returns the removed envelope and how many categories were unlinked.
    pub fn remove_envelope(
        &self,
        team_id: TeamId,
        id: EnvelopeId,
    ) -> TeamFinResult<(BudgetEnvelope, usize)> {
        self.authorize(team_id, "remove envelopes")?;

        let envelope = self.require_envelope(team_id, id)?;

        self.storage.envelopes.delete(id)?;
        let unlinked = self.storage.categories.unlink_envelope(id)?;

        self.storage.envelopes.save()?;
        self.storage.categories.save()?;

        tracing::info!(team = %team_id, envelope = %envelope.name, unlinked, "envelope removed");
        Ok((envelope, unlinked))
    }

    /// A team's envelopes in creation order
    pub fn list_envelopes(&self, team_id: TeamId) -> TeamFinResult<Vec<BudgetEnvelope>> {
        self.storage.envelopes.get_for_team(team_id)
    }

    /// Find an envelope by name or ID string
    pub fn find_envelope(
        &self,
        team_id: TeamId,
        identifier: &str,
    ) -> TeamFinResult<Option<BudgetEnvelope>> {
        if let Some(envelope) = self.storage.envelopes.get_by_name(team_id, identifier)? {
            return Ok(Some(envelope));
        }

        if let Ok(id) = identifier.parse::<EnvelopeId>() {
            return Ok(self
                .storage
                .envelopes
                .get(id)?
                .filter(|e| e.team_id == team_id));
        }

        Ok(None)
    }

    fn require_envelope(&self, team_id: TeamId, id: EnvelopeId) -> TeamFinResult<BudgetEnvelope> {
        self.storage
            .envelopes
            .get(id)?
            .filter(|e| e.team_id == team_id)
            .ok_or_else(|| TeamFinError::envelope_not_found(id.to_string()))
    }

    // === Categories ===

    /// Create an expense category, optionally linked to an envelope
    pub fn add_category(
        &self,
        team_id: TeamId,
        name: &str,
        envelope_id: Option<EnvelopeId>,
    ) -> TeamFinResult<ExpenseCategory> {
        self.authorize(team_id, "add categories")?;

        let name = name.trim();
        if self.storage.categories.get_by_name(team_id, name)?.is_some() {
            return Err(TeamFinError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        if let Some(envelope_id) = envelope_id {
            self.require_envelope(team_id, envelope_id)?;
        }

        let mut category = ExpenseCategory::new(team_id, name);
        category.link_to(envelope_id);
        category
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(team = %team_id, category = %category.name, "category added");
        Ok(category)
    }

    /// Point a category at an envelope, or unlink it with `None`
    pub fn link_category(
        &self,
        team_id: TeamId,
        category_id: CategoryId,
        envelope_id: Option<EnvelopeId>,
    ) -> TeamFinResult<ExpenseCategory> {
        self.authorize(team_id, "link categories")?;

        let mut category = self
            .storage
            .categories
            .get(category_id)?
            .filter(|c| c.team_id == team_id)
            .ok_or_else(|| TeamFinError::category_not_found(category_id.to_string()))?;
        if let Some(envelope_id) = envelope_id {
            self.require_envelope(team_id, envelope_id)?;
        }

        category.link_to(envelope_id);
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(team = %team_id, category = %category.name, linked = envelope_id.is_some(), "category link changed");
        Ok(category)
    }

    /// A team's categories sorted by name
    pub fn list_categories(&self, team_id: TeamId) -> TeamFinResult<Vec<ExpenseCategory>> {
        self.storage.categories.get_for_team(team_id)
    }

    /// Find a category by name or ID string
    pub fn find_category(
        &self,
        team_id: TeamId,
        identifier: &str,
    ) -> TeamFinResult<Option<ExpenseCategory>> {
        if let Some(category) = self.storage.categories.get_by_name(team_id, identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(self
                .storage
                .categories
                .get(id)?
                .filter(|c| c.team_id == team_id));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TeamFinPaths;
    use crate::permissions::{AllowAll, Role, RoleTable};
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
    fn test_set_income_replaces() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let team = TeamId::new();
        let period = MonthPeriod::new(2025, 3).unwrap();

        service.set_income(team, period, Money::from_units(1000)).unwrap();
        service.set_income(team, period, Money::from_units(1500)).unwrap();

        assert_eq!(storage.budgets.count().unwrap(), 1);
        let budget = service.get_budget(team, period).unwrap().unwrap();
        assert_eq!(budget.total_income, Money::from_units(1500));
    }

    #[test]
    fn test_negative_income_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let period = MonthPeriod::new(2025, 3).unwrap();

        let err = service
            .set_income(TeamId::new(), period, Money::from_units(-1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_envelope_lifecycle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let team = TeamId::new();

        let housing = service
            .add_envelope(team, "Moradia", dec!(0.4), Classification::Needs)
            .unwrap();
        assert!(service
            .add_envelope(team, "moradia", dec!(0.1), Classification::Needs)
            .is_err());
        assert!(service
            .add_envelope(team, "Demais", dec!(1.2), Classification::Other)
            .unwrap_err()
            .is_validation());

        let updated = service
            .update_envelope(
                team,
                housing.id,
                EnvelopeUpdate {
                    percentage: Some(dec!(0.45)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.percentage, dec!(0.45));

        let found = service.find_envelope(team, "MORADIA").unwrap().unwrap();
        assert_eq!(found.id, housing.id);
        assert!(service.find_envelope(TeamId::new(), "Moradia").unwrap().is_none());
    }

    #[test]
    fn test_remove_envelope_unlinks_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let team = TeamId::new();

        let envelope = service
            .add_envelope(team, "Lazer", dec!(0.2), Classification::Wants)
            .unwrap();
        let category = service
            .add_category(team, "Cinema", Some(envelope.id))
            .unwrap();

        let (_, unlinked) = service.remove_envelope(team, envelope.id).unwrap();
        assert_eq!(unlinked, 1);
        assert!(service.list_envelopes(team).unwrap().is_empty());

        let category = storage.categories.get(category.id).unwrap().unwrap();
        assert!(category.envelope_id.is_none());
    }

    #[test]
    fn test_link_category_checks_team() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let team = TeamId::new();
        let other = TeamId::new();

        let foreign = service
            .add_envelope(other, "Outro", dec!(0.1), Classification::Other)
            .unwrap();
        let category = service.add_category(team, "Mercado", None).unwrap();

        let err = service
            .link_category(team, category.id, Some(foreign.id))
            .unwrap_err();
        assert!(err.is_not_found());

        let own = service
            .add_envelope(team, "Essenciais", dec!(0.5), Classification::Needs)
            .unwrap();
        let linked = service
            .link_category(team, category.id, Some(own.id))
            .unwrap();
        assert_eq!(linked.envelope_id, Some(own.id));

        let unlinked = service.link_category(team, category.id, None).unwrap();
        assert!(unlinked.envelope_id.is_none());
    }

    #[test]
    fn test_uncategorized_name_is_reserved() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage, &AllowAll, MemberId::new());
        let team = TeamId::new();

        let err = service.add_category(team, " sem categoria ", None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.categories.count().unwrap(), 0);
    }

    #[test]
    fn test_permission_denied_for_viewer() {
        let (_temp_dir, storage) = create_test_storage();
        let team = TeamId::new();
        let viewer = MemberId::new();
        let mut roles = RoleTable::new();
        roles.grant(team, viewer, Role::Viewer);

        let service = BudgetService::new(&storage, &roles, viewer);

        let err = service
            .add_envelope(team, "Moradia", dec!(0.4), Classification::Needs)
            .unwrap_err();
        assert!(err.is_permission_denied());

        let err = service
            .set_income(team, MonthPeriod::new(2025, 1).unwrap(), Money::from_units(10))
            .unwrap_err();
        assert!(err.is_permission_denied());

        // reads stay open
        assert!(service.list_envelopes(team).unwrap().is_empty());
        assert_eq!(storage.envelopes.count().unwrap(), 0);
    }
}
