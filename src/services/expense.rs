//! Expense service
//!
//! Records and removes a team's expenses. Recording is open to every
//! member; only budget configuration goes through the permission gate.

use chrono::{DateTime, Utc};

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money, MonthPeriod, TeamId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense. The amount must be positive and the category,
    /// when given, must belong to the team.
    pub fn record(
        &self,
        team_id: TeamId,
        amount: Money,
        date: DateTime<Utc>,
        category_id: Option<CategoryId>,
        description: &str,
    ) -> TeamFinResult<Expense> {
        if let Some(category_id) = category_id {
            self.storage
                .categories
                .get(category_id)?
                .filter(|c| c.team_id == team_id)
                .ok_or_else(|| TeamFinError::category_not_found(category_id.to_string()))?;
        }

        let mut expense = Expense::new(team_id, amount, date).with_description(description.trim());
        expense.category_id = category_id;
        expense
            .validate()
            .map_err(|e| TeamFinError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(team = %team_id, expense = %expense.id, amount = %expense.amount, "expense recorded");
        Ok(expense)
    }

    /// Expenses dated within a month, oldest first
    pub fn list_for_month(&self, team_id: TeamId, period: MonthPeriod) -> TeamFinResult<Vec<Expense>> {
        let window = period.window()?;
        self.storage
            .expenses
            .get_in_range(team_id, window.start, window.end)
    }

    /// Find an expense by full ID or by the short form shown in listings
    pub fn find(&self, team_id: TeamId, identifier: &str) -> TeamFinResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return Ok(self
                .storage
                .expenses
                .get(id)?
                .filter(|e| e.team_id == team_id));
        }

        let mut matches = self
            .storage
            .expenses
            .get_for_team(team_id)?
            .into_iter()
            .filter(|e| e.id.matches_short(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(Some(expense)),
            (Some(_), Some(_)) => Err(TeamFinError::Validation(format!(
                "Ambiguous expense ID: {}",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Delete an expense of the team
    pub fn delete(&self, team_id: TeamId, id: ExpenseId) -> TeamFinResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .filter(|e| e.team_id == team_id)
            .ok_or_else(|| TeamFinError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        tracing::info!(team = %team_id, expense = %id, "expense deleted");
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TeamFinPaths;
    use crate::models::ExpenseCategory;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TeamFinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_record_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let team = TeamId::new();

        service
            .record(team, Money::from_cents(4590), day(2), None, " Padaria ")
            .unwrap();
        service
            .record(team, Money::from_units(10), Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(), None, "")
            .unwrap();

        let may = service
            .list_for_month(team, MonthPeriod::new(2025, 5).unwrap())
            .unwrap();
        assert_eq!(may.len(), 1);
        assert_eq!(may[0].description, "Padaria");
    }

    #[test]
    fn test_record_rejects_non_positive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for amount in [Money::zero(), Money::from_units(-5)] {
            let err = service
                .record(TeamId::new(), amount, day(3), None, "")
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_record_rejects_foreign_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let team = TeamId::new();
        let foreign = ExpenseCategory::new(TeamId::new(), "Mercado");
        storage.categories.upsert(foreign.clone()).unwrap();

        let err = service
            .record(team, Money::from_units(5), day(3), Some(foreign.id), "")
            .unwrap_err();
        assert!(err.is_not_found());

        let own = ExpenseCategory::new(team, "Mercado");
        storage.categories.upsert(own.clone()).unwrap();
        let expense = service
            .record(team, Money::from_units(5), day(3), Some(own.id), "")
            .unwrap();
        assert_eq!(expense.category_id, Some(own.id));
    }

    #[test]
    fn test_find_by_short_id_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let team = TeamId::new();
        let expense = service
            .record(team, Money::from_units(12), day(4), None, "Uber")
            .unwrap();

        let short = expense.id.to_string();
        let found = service.find(team, &short).unwrap().unwrap();
        assert_eq!(found.id, expense.id);
        assert!(service.find(TeamId::new(), &short).unwrap().is_none());

        service.delete(team, expense.id).unwrap();
        assert!(service.delete(team, expense.id).unwrap_err().is_not_found());
    }
}
