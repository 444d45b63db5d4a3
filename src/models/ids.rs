//! Typed identifiers
//!
//! Every entity gets its own UUID newtype so a `CategoryId` can never be
//! passed where an `EnvelopeId` is expected. IDs serialize as plain UUIDs
//! and display in a short prefixed form (`exp-1a2b3c4d`) for listings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix used by the short display form
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Check a short form typed by the user ("exp-1a2b", "1a2b3c4d")
            /// against this ID
            pub fn matches_short(&self, short: &str) -> bool {
                let short = short.trim();
                let short = short.strip_prefix(Self::PREFIX).unwrap_or(short);
                !short.is_empty()
                    && self
                        .0
                        .hyphenated()
                        .to_string()
                        .starts_with(&short.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let full = self.0.hyphenated().to_string();
                write!(f, "{}{}", Self::PREFIX, &full[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts a full UUID, optionally carrying the display prefix
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix(Self::PREFIX).unwrap_or(s);
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// A household or group sharing one budget
    TeamId => "team-"
);
define_id!(
    /// A person acting on behalf of a team
    MemberId => "mbr-"
);
define_id!(BudgetId => "bud-");
define_id!(EnvelopeId => "env-");
define_id!(CategoryId => "cat-");
define_id!(ExpenseId => "exp-");
define_id!(InvestmentId => "inv-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_display() {
        let id = EnvelopeId::new();
        let display = id.to_string();
        assert!(display.starts_with("env-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain: TeamId = uuid_str.parse().unwrap();
        let prefixed: TeamId = format!("team-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
        assert!("team-550e8400".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_matches_short() {
        let id: ExpenseId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches_short("exp-550e8400"));
        assert!(id.matches_short("550E84"));
        assert!(id.matches_short(&id.to_string()));
        assert!(!id.matches_short("exp-"));
        assert!(!id.matches_short("exp-660e"));
    }

    #[test]
    fn test_serializes_as_plain_uuid() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
