//! Test doubles and fixture builders for the reconciliation pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::data_fetcher::api::ResultsSource;
use crate::data_fetcher::models::{
    Group, LeagueEntry, Match, MatchResult, SeasonValue, Sport, TableRow, Team,
};
use crate::data_fetcher::models::matches::FINAL_RESULT_TYPE_ID;
use crate::data_fetcher::processors::KnockoutTie;
use crate::error::AppError;

/// One request made against a [`MockResultsSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    CurrentRound {
        shortcut: String,
    },
    Table {
        shortcut: String,
        season: i32,
    },
    Groups {
        shortcut: String,
        season: i32,
    },
    Matches {
        shortcut: String,
        season: i32,
        ordinal: i32,
    },
    RoundMatches {
        shortcut: String,
        season: i32,
        ordinal: i32,
    },
    AvailableLeagues,
}

/// Scripted outcome: data, or the HTTP status the request fails with.
type Scripted<T> = Result<T, u16>;

type RoundKey = (String, i32, i32);
type SeasonKey = (String, i32);

/// In-memory results source with scripted responses.
///
/// Requests without a scripted response fail with 404. Every request is
/// recorded and can be inspected with [`MockResultsSource::calls`].
#[derive(Debug, Default)]
pub struct MockResultsSource {
    current_rounds: HashMap<String, Scripted<Group>>,
    tables: HashMap<SeasonKey, Scripted<Vec<TableRow>>>,
    groups: HashMap<SeasonKey, Scripted<Vec<Group>>>,
    matches: HashMap<RoundKey, Scripted<Vec<Match>>>,
    round_matches: HashMap<RoundKey, Scripted<Vec<Match>>>,
    leagues: Option<Scripted<Vec<LeagueEntry>>>,
    calls: Mutex<Vec<SourceCall>>,
}

fn scripted<T: Clone>(entry: Option<&Scripted<T>>, url: String) -> Result<T, AppError> {
    match entry {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(status)) => Err(AppError::from_status(*status, "Scripted failure", url)),
        None => Err(AppError::api_not_found(url)),
    }
}

impl MockResultsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_round(mut self, shortcut: &str, group: Group) -> Self {
        self.current_rounds.insert(shortcut.to_string(), Ok(group));
        self
    }

    pub fn with_current_round_error(mut self, shortcut: &str, status: u16) -> Self {
        self.current_rounds.insert(shortcut.to_string(), Err(status));
        self
    }

    pub fn with_table(mut self, shortcut: &str, season: i32, rows: Vec<TableRow>) -> Self {
        self.tables.insert((shortcut.to_string(), season), Ok(rows));
        self
    }

    pub fn with_table_error(mut self, shortcut: &str, season: i32, status: u16) -> Self {
        self.tables.insert((shortcut.to_string(), season), Err(status));
        self
    }

    pub fn with_groups(mut self, shortcut: &str, season: i32, groups: Vec<Group>) -> Self {
        self.groups.insert((shortcut.to_string(), season), Ok(groups));
        self
    }

    pub fn with_groups_error(mut self, shortcut: &str, season: i32, status: u16) -> Self {
        self.groups.insert((shortcut.to_string(), season), Err(status));
        self
    }

    pub fn with_matches(
        mut self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
        matches: Vec<Match>,
    ) -> Self {
        self.matches
            .insert((shortcut.to_string(), season, ordinal), Ok(matches));
        self
    }

    pub fn with_matches_error(
        mut self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
        status: u16,
    ) -> Self {
        self.matches
            .insert((shortcut.to_string(), season, ordinal), Err(status));
        self
    }

    /// Scripts the knockout stage endpoint. Unscripted stage rounds fall back
    /// to the matchday script, like the default trait method.
    pub fn with_round_matches(
        mut self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
        matches: Vec<Match>,
    ) -> Self {
        self.round_matches
            .insert((shortcut.to_string(), season, ordinal), Ok(matches));
        self
    }

    pub fn with_round_matches_error(
        mut self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
        status: u16,
    ) -> Self {
        self.round_matches
            .insert((shortcut.to_string(), season, ordinal), Err(status));
        self
    }

    pub fn with_leagues(mut self, entries: Vec<LeagueEntry>) -> Self {
        self.leagues = Some(Ok(entries));
        self
    }

    pub fn with_leagues_error(mut self, status: u16) -> Self {
        self.leagues = Some(Err(status));
        self
    }

    /// Requests made so far, in order.
    pub fn calls(&self) -> Vec<SourceCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<SourceCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: SourceCall) {
        self.lock_calls().push(call);
    }

    fn scripted_matches(&self, shortcut: &str, season: i32, ordinal: i32) -> Result<Vec<Match>, AppError> {
        scripted(
            self.matches.get(&(shortcut.to_string(), season, ordinal)),
            format!("mock://getmatchdata/{shortcut}/{season}/{ordinal}"),
        )
    }
}

impl ResultsSource for MockResultsSource {
    async fn fetch_current_round(&self, shortcut: &str) -> Result<Group, AppError> {
        self.record(SourceCall::CurrentRound {
            shortcut: shortcut.to_string(),
        });
        scripted(
            self.current_rounds.get(shortcut),
            format!("mock://getcurrentgroup/{shortcut}"),
        )
    }

    async fn fetch_table(&self, shortcut: &str, season: i32) -> Result<Vec<TableRow>, AppError> {
        self.record(SourceCall::Table {
            shortcut: shortcut.to_string(),
            season,
        });
        scripted(
            self.tables.get(&(shortcut.to_string(), season)),
            format!("mock://getbltable/{shortcut}/{season}"),
        )
    }

    async fn fetch_groups(&self, shortcut: &str, season: i32) -> Result<Vec<Group>, AppError> {
        self.record(SourceCall::Groups {
            shortcut: shortcut.to_string(),
            season,
        });
        scripted(
            self.groups.get(&(shortcut.to_string(), season)),
            format!("mock://getgroups/{shortcut}/{season}"),
        )
    }

    async fn fetch_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> Result<Vec<Match>, AppError> {
        self.record(SourceCall::Matches {
            shortcut: shortcut.to_string(),
            season,
            ordinal,
        });
        self.scripted_matches(shortcut, season, ordinal)
    }

    async fn fetch_round_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> Result<Vec<Match>, AppError> {
        self.record(SourceCall::RoundMatches {
            shortcut: shortcut.to_string(),
            season,
            ordinal,
        });
        match self.round_matches.get(&(shortcut.to_string(), season, ordinal)) {
            Some(entry) => scripted(
                Some(entry),
                format!("mock://getmatchbygroup/{shortcut}/{ordinal}/{season}"),
            ),
            None => self.scripted_matches(shortcut, season, ordinal),
        }
    }

    async fn fetch_available_leagues(&self) -> Result<Vec<LeagueEntry>, AppError> {
        self.record(SourceCall::AvailableLeagues);
        scripted(
            self.leagues.as_ref(),
            "mock://getavailableleagues".to_string(),
        )
    }
}

/// Test utilities for creating fixture data
pub struct TestDataBuilder;

impl TestDataBuilder {
    pub fn team(id: i64, name: &str) -> Team {
        Team {
            team_id: Some(id),
            team_name: Some(name.to_string()),
            short_name: None,
            team_icon_url: None,
        }
    }

    /// A match that has not been played yet, kicking off on a fixed date.
    pub fn scheduled_match(match_id: i64, home: (i64, &str), away: (i64, &str)) -> Match {
        Match {
            match_id: Some(match_id),
            match_date_time_utc: Some("2025-03-04T20:00:00Z".to_string()),
            team1: Some(Self::team(home.0, home.1)),
            team2: Some(Self::team(away.0, away.1)),
            match_is_finished: Some(false),
            ..Match::default()
        }
    }

    /// A finished match with a final result.
    pub fn finished_match(
        match_id: i64,
        home: (i64, &str),
        away: (i64, &str),
        home_goals: i32,
        away_goals: i32,
    ) -> Match {
        Match {
            match_is_finished: Some(true),
            match_results: vec![MatchResult {
                result_type_id: Some(FINAL_RESULT_TYPE_ID),
                result_name: Some("Endergebnis".to_string()),
                points_team1: Some(home_goals),
                points_team2: Some(away_goals),
                ..MatchResult::default()
            }],
            ..Self::scheduled_match(match_id, home, away)
        }
    }

    /// Sets the UTC kickoff of a match.
    pub fn kicking_off(mut game: Match, kickoff_utc: &str) -> Match {
        game.match_date_time_utc = Some(kickoff_utc.to_string());
        game
    }

    pub fn table_row(team_id: i64, team_name: &str, points: i32) -> TableRow {
        TableRow {
            team_info_id: Some(team_id),
            team_name: Some(team_name.to_string()),
            points: Some(points),
            ..TableRow::default()
        }
    }

    /// A football entry of the league listing.
    pub fn league_entry(shortcut: &str, name: &str, season: i64) -> LeagueEntry {
        LeagueEntry {
            league_id: None,
            league_name: Some(name.to_string()),
            league_season: Some(SeasonValue::Number(season)),
            league_shortcut: Some(shortcut.to_string()),
            sport: Some(Sport {
                sport_id: Some(1),
                sport_name: Some("Fußball".to_string()),
            }),
        }
    }

    /// Consecutive matchdays `1..=count` named like the Bundesliga does.
    pub fn matchdays(count: i32) -> Vec<Group> {
        (1..=count)
            .map(|ordinal| Group::new(format!("{ordinal}. Spieltag"), ordinal))
            .collect()
    }
}

/// Structural checks shared by tie tests
pub struct PropertyTesting;

impl PropertyTesting {
    /// Checks that `ties` is a partition of `matches` with consistent aggregates.
    pub fn validate_ties(matches: &[Match], ties: &[KnockoutTie]) -> Result<(), String> {
        let mut keys = HashSet::new();
        for tie in ties {
            if !keys.insert(tie.key.as_str()) {
                return Err(format!("Tie key {} appears more than once", tie.key));
            }
            if tie.matches.is_empty() {
                return Err(format!("Tie {} has no legs", tie.key));
            }
            if let Some(aggregate) = &tie.aggregate_score {
                if aggregate.total_legs != tie.matches.len() {
                    return Err(format!("Tie {} reports a wrong leg count", tie.key));
                }
                if aggregate.counted_legs == 0 || aggregate.counted_legs > aggregate.total_legs {
                    return Err(format!("Tie {} counted an impossible number of legs", tie.key));
                }
            }
        }

        let grouped: usize = ties.iter().map(|tie| tie.matches.len()).sum();
        if grouped != matches.len() {
            return Err(format!(
                "{} matches were grouped but {} were given",
                grouped,
                matches.len()
            ));
        }

        Ok(())
    }
}
