use super::groups::Group;
use super::matches::Match;
use super::table::TableRow;
use crate::data_fetcher::processors::KnockoutTie;
use crate::leagues::LeagueKey;
use serde::Serialize;
use std::fmt;

/// Label of the current round when the API does not name it.
pub const DEFAULT_CURRENT_ROUND_LABEL: &str = "Latest Matchday";

/// Label of the next round when its stage is not in the stage list.
pub const DEFAULT_NEXT_ROUND_LABEL: &str = "Next Matchday";

/// Logical data categories that can fail to load independently.
///
/// Serializes to the human-readable label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataCategory {
    #[serde(rename = "current group")]
    CurrentGroup,
    #[serde(rename = "matchday results")]
    Matchday,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "groups")]
    Groups,
    #[serde(rename = "playoff matches")]
    Playoffs,
    #[serde(rename = "next round groups")]
    NextGroups,
    #[serde(rename = "next round matches")]
    NextMatchday,
    #[serde(rename = "knockout rounds")]
    KnockoutRounds,
}

impl DataCategory {
    pub fn label(self) -> &'static str {
        match self {
            DataCategory::CurrentGroup => "current group",
            DataCategory::Matchday => "matchday results",
            DataCategory::Table => "table",
            DataCategory::Groups => "groups",
            DataCategory::Playoffs => "playoff matches",
            DataCategory::NextGroups => "next round groups",
            DataCategory::NextMatchday => "next round matches",
            DataCategory::KnockoutRounds => "knockout rounds",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulates failed categories in first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataErrors {
    categories: Vec<DataCategory>,
}

impl DataErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: DataCategory) {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    pub fn into_vec(self) -> Vec<DataCategory> {
        self.categories
    }
}

/// One knockout round of the bracket with its matches and grouped ties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketRound {
    pub group: Group,
    pub matches: Vec<Match>,
    pub ties: Vec<KnockoutTie>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentRound {
    pub name: String,
    pub order_id: i32,
    pub matches: Vec<Match>,
}

/// The first round after the current one that has any matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextRound {
    pub name: String,
    pub order_id: i32,
    pub matches: Vec<Match>,
}

/// Consolidated view of a competition at the time of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub league: LeagueKey,
    pub season: i32,
    pub current_round: CurrentRound,
    pub next_round: Option<NextRound>,
    pub table: Vec<TableRow>,
    pub bracket: Vec<BracketRound>,
    pub visible_errors: Vec<DataCategory>,
}

/// Data gathered before a reconciliation failed on the missing current round.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialReconciliation {
    pub table: Vec<TableRow>,
    pub groups: Vec<Group>,
    pub playoff_matches: Vec<Match>,
    pub visible_errors: Vec<DataCategory>,
}
