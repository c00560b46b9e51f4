use serde::{Deserialize, Serialize};

/// One standings row from the league table endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "teamInfoId", default)]
    pub team_info_id: Option<i64>,
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "teamIconUrl", default)]
    pub team_icon_url: Option<String>,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(rename = "opponentGoals", default)]
    pub opponent_goals: Option<i32>,
    #[serde(default)]
    pub goals: Option<i32>,
    #[serde(default)]
    pub matches: Option<i32>,
    #[serde(default)]
    pub won: Option<i32>,
    #[serde(default)]
    pub lost: Option<i32>,
    #[serde(default)]
    pub draw: Option<i32>,
    #[serde(rename = "goalDiff", default)]
    pub goal_diff: Option<i32>,
}
