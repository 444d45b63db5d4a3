//! Permission gate consulted before budget mutations
//!
//! Reports never ask it; only the services in [`crate::services`] do.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{MemberId, TeamId};

/// Decides whether a member may change a team's budget
pub trait PermissionGate {
    fn can_manage_budget(&self, team_id: TeamId, member_id: MemberId) -> bool;
}

/// A member's role inside a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl Role {
    pub fn can_manage_budget(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Role lookup keyed by team and member. Unknown members are denied.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: HashMap<(TeamId, MemberId), Role>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for the settings' default team
    pub fn from_settings(settings: &Settings) -> Self {
        let mut table = Self::new();
        if let Some(team_id) = settings.default_team {
            for entry in &settings.members {
                table.grant(team_id, entry.member_id, entry.role);
            }
        }
        table
    }

    pub fn grant(&mut self, team_id: TeamId, member_id: MemberId, role: Role) {
        self.roles.insert((team_id, member_id), role);
    }

    pub fn role(&self, team_id: TeamId, member_id: MemberId) -> Option<Role> {
        self.roles.get(&(team_id, member_id)).copied()
    }
}

impl PermissionGate for RoleTable {
    fn can_manage_budget(&self, team_id: TeamId, member_id: MemberId) -> bool {
        self.role(team_id, member_id)
            .map(|role| role.can_manage_budget())
            .unwrap_or(false)
    }
}

/// Gate that lets everyone through
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn can_manage_budget(&self, _team_id: TeamId, _member_id: MemberId) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_table_rules() {
        let team = TeamId::new();
        let owner = MemberId::new();
        let admin = MemberId::new();
        let member = MemberId::new();
        let viewer = MemberId::new();

        let mut table = RoleTable::new();
        table.grant(team, owner, Role::Owner);
        table.grant(team, admin, Role::Admin);
        table.grant(team, member, Role::Member);
        table.grant(team, viewer, Role::Viewer);

        assert!(table.can_manage_budget(team, owner));
        assert!(table.can_manage_budget(team, admin));
        assert!(!table.can_manage_budget(team, member));
        assert!(!table.can_manage_budget(team, viewer));
        assert!(!table.can_manage_budget(team, MemberId::new()));
        assert!(!table.can_manage_budget(TeamId::new(), owner));
    }

    #[test]
    fn test_from_settings() {
        let team = TeamId::new();
        let member = MemberId::new();
        let mut settings = Settings::default();
        settings.default_team = Some(team);
        settings.set_role(member, Role::Admin);

        let table = RoleTable::from_settings(&settings);
        assert_eq!(table.role(team, member), Some(Role::Admin));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!(" viewer ".parse::<Role>().unwrap(), Role::Viewer);
        assert!("boss".parse::<Role>().is_err());
    }

    #[test]
    fn test_allow_all() {
        assert!(AllowAll.can_manage_budget(TeamId::new(), MemberId::new()));
    }
}
