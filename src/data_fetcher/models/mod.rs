pub mod groups;
pub mod league;
pub mod matches;
pub mod table;
pub mod view;

pub use groups::Group;
pub use league::{LeagueEntry, SeasonValue, Sport};
pub use matches::{Goal, Match, MatchResult, Team};
pub use table::TableRow;
pub use view::{
    BracketRound, CurrentRound, DataCategory, DataErrors, NextRound, PartialReconciliation,
    Reconciliation,
};

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
