//! Groups two-legged knockout matches into ties with aggregate scores.
//!
//! The API returns the legs of a knockout stage as a flat list with no pairing.
//! Legs are paired by the identity of the two teams regardless of which of them
//! played at home, and the tie's slots are assigned from the lexicographic order
//! of those identities so repeated runs over the same input agree.

use crate::data_fetcher::models::{Match, Team};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Stable identity of one side of a match, usable as a map key.
///
/// Team id first, then the normalized team name. A side with neither gets an
/// identity tied to its own match and side, so two unidentified teams are
/// never treated as the same team, not even across legs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamIdentity(String);

impl TeamIdentity {
    fn of(team: Option<&Team>, game: &Match, side: Side) -> Self {
        if let Some(id) = team.and_then(|t| t.team_id) {
            return TeamIdentity(format!("id:{id}"));
        }

        let normalized_name = team
            .and_then(|t| t.team_name.as_deref())
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty());
        if let Some(name) = normalized_name {
            return TeamIdentity(format!("name:{name}"));
        }

        let match_key = match game.match_id {
            Some(id) => id.to_string(),
            None => format!(
                "{}-{}",
                game.kickoff_raw().unwrap_or("unknown"),
                side.as_str()
            ),
        };
        TeamIdentity(format!("unknown:{match_key}:{}", side.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display metadata of a team in a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieTeam {
    pub team_id: Option<i64>,
    pub team_name: String,
    pub team_icon_url: Option<String>,
}

impl TieTeam {
    fn from_team(team: Option<&Team>, fallback: &str) -> Self {
        TieTeam {
            team_id: team.and_then(|t| t.team_id),
            team_name: team
                .and_then(|t| t.team_name.clone())
                .unwrap_or_else(|| fallback.to_string()),
            team_icon_url: team.and_then(|t| t.team_icon_url.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TieSlot {
    Team1,
    Team2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateScore {
    pub team1: i32,
    pub team2: i32,
    /// Legs with a result that were attributed to the tie's teams.
    pub counted_legs: usize,
    pub total_legs: usize,
    /// Slot with the strictly higher aggregate; `None` when level.
    pub leader: Option<TieSlot>,
}

/// All legs between the same two teams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnockoutTie {
    /// `<team1 identity>__<team2 identity>`
    pub key: String,
    pub team1: TieTeam,
    pub team2: TieTeam,
    /// Legs in kickoff order.
    pub matches: Vec<Match>,
    /// Present only when at least one leg has a result.
    pub aggregate_score: Option<AggregateScore>,
}

struct TieAccumulator {
    team1_identity: TeamIdentity,
    team2_identity: TeamIdentity,
    team_by_identity: HashMap<TeamIdentity, TieTeam>,
    matches: Vec<Match>,
}

fn match_time_key(game: &Match) -> i64 {
    game.kickoff_timestamp_ms().unwrap_or(i64::MAX)
}

/// Orders legs by kickoff (unparsable last), then by match id.
pub fn compare_matches(a: &Match, b: &Match) -> Ordering {
    match_time_key(a)
        .cmp(&match_time_key(b))
        .then_with(|| a.match_id.unwrap_or(0).cmp(&b.match_id.unwrap_or(0)))
}

fn side_identities(game: &Match) -> (TeamIdentity, TeamIdentity) {
    (
        TeamIdentity::of(game.team1.as_ref(), game, Side::Home),
        TeamIdentity::of(game.team2.as_ref(), game, Side::Away),
    )
}

fn aggregate_score(
    matches: &[Match],
    team1_identity: &TeamIdentity,
    team2_identity: &TeamIdentity,
) -> Option<AggregateScore> {
    let mut team1 = 0;
    let mut team2 = 0;
    let mut counted_legs = 0;

    for game in matches {
        let Some(final_result) = game.final_result() else {
            continue;
        };

        let (home_identity, away_identity) = side_identities(game);
        let home_score = final_result.points_team1.unwrap_or(0);
        let away_score = final_result.points_team2.unwrap_or(0);

        if &home_identity == team1_identity && &away_identity == team2_identity {
            team1 += home_score;
            team2 += away_score;
            counted_legs += 1;
        } else if &home_identity == team2_identity && &away_identity == team1_identity {
            team1 += away_score;
            team2 += home_score;
            counted_legs += 1;
        }
    }

    if counted_legs == 0 {
        return None;
    }

    let leader = match team1.cmp(&team2) {
        Ordering::Greater => Some(TieSlot::Team1),
        Ordering::Less => Some(TieSlot::Team2),
        Ordering::Equal => None,
    };

    Some(AggregateScore {
        team1,
        team2,
        counted_legs,
        total_legs: matches.len(),
        leader,
    })
}

/// Groups the matches of one knockout stage into ties.
///
/// Ties come back ordered by their first leg. A single-leg tie is valid and
/// gets an aggregate from that one leg.
pub fn group_knockout_matches_by_tie(matches: &[Match]) -> Vec<KnockoutTie> {
    let mut order: Vec<String> = Vec::new();
    let mut ties: HashMap<String, TieAccumulator> = HashMap::new();

    for game in matches {
        let (home_identity, away_identity) = side_identities(game);
        let (team1_identity, team2_identity) = if home_identity < away_identity {
            (home_identity.clone(), away_identity.clone())
        } else {
            (away_identity.clone(), home_identity.clone())
        };
        let tie_key = format!("{team1_identity}__{team2_identity}");

        let tie = ties.entry(tie_key.clone()).or_insert_with(|| {
            order.push(tie_key);
            TieAccumulator {
                team1_identity,
                team2_identity,
                team_by_identity: HashMap::new(),
                matches: Vec::new(),
            }
        });

        tie.matches.push(game.clone());
        tie.team_by_identity
            .entry(home_identity)
            .or_insert_with(|| TieTeam::from_team(game.team1.as_ref(), "Home"));
        tie.team_by_identity
            .entry(away_identity)
            .or_insert_with(|| TieTeam::from_team(game.team2.as_ref(), "Away"));
    }

    let mut grouped: Vec<KnockoutTie> = order
        .into_iter()
        .filter_map(|key| ties.remove(&key).map(|tie| (key, tie)))
        .map(|(key, mut tie)| {
            tie.matches.sort_by(compare_matches);
            let first_match = tie.matches.first();

            let team1 = tie
                .team_by_identity
                .remove(&tie.team1_identity)
                .unwrap_or_else(|| {
                    TieTeam::from_team(first_match.and_then(|m| m.team1.as_ref()), "Team 1")
                });
            let team2 = tie
                .team_by_identity
                .remove(&tie.team2_identity)
                .unwrap_or_else(|| {
                    TieTeam::from_team(first_match.and_then(|m| m.team2.as_ref()), "Team 2")
                });

            let aggregate_score =
                aggregate_score(&tie.matches, &tie.team1_identity, &tie.team2_identity);

            trace!(
                "Tie {} has {} legs, aggregate {:?}",
                key,
                tie.matches.len(),
                aggregate_score
            );

            KnockoutTie {
                key,
                team1,
                team2,
                matches: tie.matches,
                aggregate_score,
            }
        })
        .collect();

    // Every tie has at least one leg; stable sort keeps first-seen order on equal keys.
    grouped.sort_by(|a, b| match (a.matches.first(), b.matches.first()) {
        (Some(a), Some(b)) => compare_matches(a, b),
        _ => Ordering::Equal,
    });

    grouped
}
