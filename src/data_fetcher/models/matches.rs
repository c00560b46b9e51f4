use super::groups::Group;
use super::null_as_default;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Result type id OpenLigaDB uses for the final score of a match.
pub const FINAL_RESULT_TYPE_ID: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamId", default)]
    pub team_id: Option<i64>,
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "teamIconUrl", default)]
    pub team_icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "resultID", default)]
    pub result_id: Option<i64>,
    #[serde(rename = "resultName", default)]
    pub result_name: Option<String>,
    #[serde(rename = "pointsTeam1", default)]
    pub points_team1: Option<i32>,
    #[serde(rename = "pointsTeam2", default)]
    pub points_team2: Option<i32>,
    #[serde(rename = "resultOrderID", default)]
    pub result_order_id: Option<i32>,
    #[serde(rename = "resultTypeID", default)]
    pub result_type_id: Option<i32>,
    #[serde(rename = "resultDescription", default)]
    pub result_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "goalID", default)]
    pub goal_id: Option<i64>,
    #[serde(rename = "scoreTeam1", default)]
    pub score_team1: Option<i32>,
    #[serde(rename = "scoreTeam2", default)]
    pub score_team2: Option<i32>,
    #[serde(rename = "matchMinute", default)]
    pub match_minute: Option<i32>,
    #[serde(rename = "goalGetterName", default)]
    pub goal_getter_name: Option<String>,
    #[serde(rename = "isPenalty", default)]
    pub is_penalty: Option<bool>,
    #[serde(rename = "isOwnGoal", default)]
    pub is_own_goal: Option<bool>,
    #[serde(rename = "isOvertime", default)]
    pub is_overtime: Option<bool>,
}

/// One fixture as returned by the match endpoints.
///
/// Matches are never mutated after decoding; processors hand out copies
/// (for example with chronologically sorted goals).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "matchID", default)]
    pub match_id: Option<i64>,
    #[serde(rename = "matchDateTime", default)]
    pub match_date_time: Option<String>,
    #[serde(rename = "matchDateTimeUTC", default)]
    pub match_date_time_utc: Option<String>,
    #[serde(rename = "leagueId", default)]
    pub league_id: Option<i64>,
    #[serde(rename = "leagueName", default)]
    pub league_name: Option<String>,
    #[serde(rename = "leagueSeason", default)]
    pub league_season: Option<i32>,
    #[serde(rename = "leagueShortcut", default)]
    pub league_shortcut: Option<String>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub team1: Option<Team>,
    #[serde(default)]
    pub team2: Option<Team>,
    #[serde(rename = "matchIsFinished", default)]
    pub match_is_finished: Option<bool>,
    #[serde(
        rename = "matchResults",
        default,
        deserialize_with = "null_as_default"
    )]
    pub match_results: Vec<MatchResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Vec<Goal>,
}

impl Match {
    /// Returns the final result of the match.
    ///
    /// Prefers the result flagged as the final score and falls back to the
    /// last reported result (e.g. the half-time score of a match in progress).
    pub fn final_result(&self) -> Option<&MatchResult> {
        self.match_results
            .iter()
            .find(|result| result.result_type_id == Some(FINAL_RESULT_TYPE_ID))
            .or_else(|| self.match_results.last())
    }

    pub fn is_finished(&self) -> bool {
        self.match_is_finished == Some(true)
    }

    /// Kickoff time in milliseconds since the Unix epoch.
    ///
    /// The UTC timestamp wins over the local one. Timestamps without an offset
    /// are read as UTC so ordering does not depend on the host time zone.
    pub fn kickoff_timestamp_ms(&self) -> Option<i64> {
        self.kickoff_raw().and_then(parse_timestamp_ms)
    }

    /// The raw kickoff string used for ordering and identity fallbacks.
    pub fn kickoff_raw(&self) -> Option<&str> {
        self.match_date_time_utc
            .as_deref()
            .or(self.match_date_time.as_deref())
    }
}

/// Parses an API timestamp into epoch milliseconds.
pub fn parse_timestamp_ms(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.timestamp_millis());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}
