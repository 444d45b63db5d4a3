//! User settings for teamfin
//!
//! Holds display preferences, the team and member the CLI acts as, and the
//! role table the permission gate reads.

use serde::{Deserialize, Serialize};

use super::paths::TeamFinPaths;
use crate::error::TeamFinError;
use crate::models::money::DEFAULT_CURRENCY_SYMBOL;
use crate::models::{MemberId, TeamId};
use crate::permissions::Role;

/// A member's role within the default team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRole {
    pub member_id: MemberId,
    pub role: Role,
}

/// User settings for teamfin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Team the CLI reads and writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_team: Option<TeamId>,

    /// Member the CLI acts as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acting_member: Option<MemberId>,

    /// Horizon used by `report projection` when none is given
    #[serde(default = "default_projection_years")]
    pub projection_years: i32,

    /// Role table of the default team
    #[serde(default)]
    pub members: Vec<MemberRole>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_projection_years() -> i32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_team: None,
            acting_member: None,
            projection_years: default_projection_years(),
            members: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TeamFinPaths) -> Result<Self, TeamFinError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TeamFinError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TeamFinError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TeamFinPaths) -> Result<(), TeamFinError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TeamFinError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            TeamFinError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// The team the CLI works on, or a config error before `init`
    pub fn team(&self) -> Result<TeamId, TeamFinError> {
        self.default_team
            .ok_or_else(|| TeamFinError::Config("No default team. Run 'teamfin init' first.".into()))
    }

    /// The member the CLI acts as, or a config error before `init`
    pub fn member(&self) -> Result<MemberId, TeamFinError> {
        self.acting_member
            .ok_or_else(|| TeamFinError::Config("No acting member. Run 'teamfin init' first.".into()))
    }

    /// Assign a role, replacing any previous entry for the member
    pub fn set_role(&mut self, member_id: MemberId, role: Role) {
        self.members.retain(|m| m.member_id != member_id);
        self.members.push(MemberRole { member_id, role });
    }

    pub fn role_of(&self, member_id: MemberId) -> Option<Role> {
        self.members
            .iter()
            .find(|m| m.member_id == member_id)
            .map(|m| m.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "R$");
        assert_eq!(settings.projection_years, 10);
        assert!(settings.default_team.is_none());
        assert!(settings.team().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TeamFinPaths::with_base_dir(temp_dir.path().to_path_buf());

        let team = TeamId::new();
        let member = MemberId::new();
        let mut settings = Settings::default();
        settings.default_team = Some(team);
        settings.acting_member = Some(member);
        settings.set_role(member, Role::Owner);

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.team().unwrap(), team);
        assert_eq!(loaded.member().unwrap(), member);
        assert_eq!(loaded.role_of(member), Some(Role::Owner));
    }

    #[test]
    fn test_set_role_replaces() {
        let member = MemberId::new();
        let mut settings = Settings::default();
        settings.set_role(member, Role::Viewer);
        settings.set_role(member, Role::Admin);

        assert_eq!(settings.members.len(), 1);
        assert_eq!(settings.role_of(member), Some(Role::Admin));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.projection_years, 10);
        assert!(settings.members.is_empty());
    }
}
