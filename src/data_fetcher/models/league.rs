use serde::{Deserialize, Serialize};

/// Season as reported by the league listing; some entries use strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonValue {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    #[serde(rename = "sportId", default)]
    pub sport_id: Option<i64>,
    #[serde(rename = "sportName", default)]
    pub sport_name: Option<String>,
}

/// An entry of the available leagues listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueEntry {
    #[serde(rename = "leagueId", default)]
    pub league_id: Option<i64>,
    #[serde(rename = "leagueName", default)]
    pub league_name: Option<String>,
    #[serde(rename = "leagueSeason", default)]
    pub league_season: Option<SeasonValue>,
    #[serde(rename = "leagueShortcut", default)]
    pub league_shortcut: Option<String>,
    #[serde(default)]
    pub sport: Option<Sport>,
}
