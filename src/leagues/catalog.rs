//! Supported competitions and their API shortcuts

use crate::error::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Competitions the viewer knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueKey {
    Bl1,
    Bl2,
    Fbl1,
    Fbl2,
    Dfb,
    Cl,
}

pub const DEFAULT_LEAGUE: LeagueKey = LeagueKey::Bl1;

/// How entries of the league listing are attributed to a competition.
#[derive(Debug, Clone, Copy)]
pub struct LeagueGroupConfig {
    pub key: LeagueKey,
    pub label: &'static str,
    pub name_match: &'static [&'static str],
    pub shortcut_match: &'static [&'static str],
}

/// All supported competitions in display order.
pub const LEAGUE_GROUPS: [LeagueGroupConfig; 6] = [
    LeagueGroupConfig {
        key: LeagueKey::Bl1,
        label: "Bundesliga",
        name_match: &["bundesliga"],
        shortcut_match: &["bl1"],
    },
    LeagueGroupConfig {
        key: LeagueKey::Bl2,
        label: "Zweite Bundesliga",
        name_match: &[
            "2. bundesliga",
            "2. fussball-bundesliga",
            "2. fußball-bundesliga",
        ],
        shortcut_match: &["bl2"],
    },
    LeagueGroupConfig {
        key: LeagueKey::Fbl1,
        label: "Frauen-Bundesliga",
        name_match: &[
            "1. frauen-bundesliga",
            "1. frauen bundesliga",
            "1. fussball-bundesliga damen",
            "1. fußball-bundesliga damen",
            "frauen fußball bundesliga",
            "frauen fussball bundesliga",
        ],
        shortcut_match: &["fbl1", "bl1f", "dbl1", "frbu"],
    },
    LeagueGroupConfig {
        key: LeagueKey::Fbl2,
        label: "2. Frauen-Bundesliga",
        name_match: &["2. frauen-bundesliga", "2. frauen bundesliga"],
        shortcut_match: &["fbl2", "bl2f"],
    },
    LeagueGroupConfig {
        key: LeagueKey::Dfb,
        label: "DFB-Pokal",
        name_match: &["dfb-pokal", "dfb pokal"],
        shortcut_match: &["dfb"],
    },
    LeagueGroupConfig {
        key: LeagueKey::Cl,
        label: "Champions League",
        name_match: &["champions league"],
        shortcut_match: &["cl", "ucl"],
    },
];

impl LeagueKey {
    pub fn as_str(self) -> &'static str {
        match self {
            LeagueKey::Bl1 => "bl1",
            LeagueKey::Bl2 => "bl2",
            LeagueKey::Fbl1 => "fbl1",
            LeagueKey::Fbl2 => "fbl2",
            LeagueKey::Dfb => "dfb",
            LeagueKey::Cl => "cl",
        }
    }

    pub fn config(self) -> &'static LeagueGroupConfig {
        // LEAGUE_GROUPS lists every key exactly once, in declaration order.
        &LEAGUE_GROUPS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.config().label
    }

    /// Whether the competition has a standings table (the cup does not).
    pub fn has_table(self) -> bool {
        self != LeagueKey::Dfb
    }

    /// Whether the competition publishes an explicit knockout bracket.
    pub fn has_bracket(self) -> bool {
        self == LeagueKey::Cl
    }

    /// Shortcut used for current round, table and match data.
    pub fn data_shortcut(self) -> &'static str {
        match self {
            LeagueKey::Cl => "ucl",
            other => other.as_str(),
        }
    }

    /// Shortcut tried first for the stage list.
    pub fn group_shortcut(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for LeagueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeagueKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        LEAGUE_GROUPS
            .iter()
            .map(|group| group.key)
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| AppError::InvalidLeague(s.to_string()))
    }
}

/// Shortcut for the league's data requests given the entry picked from the listing.
///
/// The second Bundesliga always uses its canonical shortcut because the
/// listing carries several historical variants of it.
pub fn resolve_effective_league_shortcut(league: LeagueKey, entry_shortcut: Option<&str>) -> String {
    if league == LeagueKey::Bl2 {
        return LeagueKey::Bl2.as_str().to_string();
    }
    entry_shortcut
        .map(str::to_string)
        .unwrap_or_else(|| league.as_str().to_string())
}

/// Shortcuts used by one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueShortcuts {
    /// Current round, table, current and next round matches.
    pub data: String,
    /// Tried before `data` when fetching the stage list.
    pub groups_primary: Option<String>,
    /// Seeded playoff round.
    pub seeded: String,
}

impl LeagueShortcuts {
    /// Shortcuts derived from the league key alone.
    pub fn for_league(league: LeagueKey) -> Self {
        Self::with_data_shortcut(league, league.data_shortcut())
    }

    /// Shortcuts for a league whose data shortcut was resolved from the listing.
    pub fn with_data_shortcut(league: LeagueKey, data: impl Into<String>) -> Self {
        let data = data.into();
        let groups_primary = league
            .has_bracket()
            .then(|| league.group_shortcut().to_string())
            .filter(|primary| *primary != data);
        LeagueShortcuts {
            data,
            groups_primary,
            seeded: league.data_shortcut().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_groups_match_declaration_order() {
        for (index, group) in LEAGUE_GROUPS.iter().enumerate() {
            assert_eq!(group.key as usize, index);
            assert_eq!(group.key.config().label, group.label);
        }
    }

    #[test]
    fn test_league_key_from_str() {
        assert_eq!("bl1".parse::<LeagueKey>().unwrap(), LeagueKey::Bl1);
        assert_eq!(" CL ".parse::<LeagueKey>().unwrap(), LeagueKey::Cl);
        assert!(matches!(
            "pl".parse::<LeagueKey>(),
            Err(AppError::InvalidLeague(_))
        ));
    }

    #[test]
    fn test_shortcut_mapping() {
        assert_eq!(LeagueKey::Cl.data_shortcut(), "ucl");
        assert_eq!(LeagueKey::Cl.group_shortcut(), "cl");
        assert_eq!(LeagueKey::Bl1.data_shortcut(), "bl1");
        assert_eq!(LeagueKey::Dfb.group_shortcut(), "dfb");
    }

    #[test]
    fn test_capabilities() {
        assert!(!LeagueKey::Dfb.has_table());
        assert!(LeagueKey::Bl1.has_table());
        assert!(LeagueKey::Cl.has_bracket());
        assert!(!LeagueKey::Bl2.has_bracket());
    }

    #[test]
    fn test_resolve_effective_league_shortcut() {
        assert_eq!(
            resolve_effective_league_shortcut(LeagueKey::Bl2, Some("bl2x")),
            "bl2"
        );
        assert_eq!(
            resolve_effective_league_shortcut(LeagueKey::Cl, Some("ucl")),
            "ucl"
        );
        assert_eq!(resolve_effective_league_shortcut(LeagueKey::Dfb, None), "dfb");
    }

    #[test]
    fn test_league_shortcuts() {
        let cl = LeagueShortcuts::for_league(LeagueKey::Cl);
        assert_eq!(cl.data, "ucl");
        assert_eq!(cl.groups_primary.as_deref(), Some("cl"));
        assert_eq!(cl.seeded, "ucl");

        let cl_same = LeagueShortcuts::with_data_shortcut(LeagueKey::Cl, "cl");
        assert_eq!(cl_same.groups_primary, None);

        let bl1 = LeagueShortcuts::for_league(LeagueKey::Bl1);
        assert_eq!(bl1.data, "bl1");
        assert_eq!(bl1.groups_primary, None);
    }

    #[test]
    fn test_league_key_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LeagueKey::Fbl2).unwrap(), "\"fbl2\"");
    }
}
