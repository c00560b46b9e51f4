//! The results source seam between the reconciliation pipeline and the API.

use std::future::Future;

use crate::data_fetcher::models::{Group, LeagueEntry, Match, TableRow};
use crate::error::AppError;

/// Typed access to the results API, one operation per endpoint.
///
/// Failures must keep the HTTP status reachable through
/// [`AppError::status_code`] so a missing resource (404) can be told apart
/// from a broken one.
pub trait ResultsSource: Send + Sync {
    /// The round currently in play for a league.
    fn fetch_current_round(
        &self,
        shortcut: &str,
    ) -> impl Future<Output = Result<Group, AppError>> + Send;

    fn fetch_table(
        &self,
        shortcut: &str,
        season: i32,
    ) -> impl Future<Output = Result<Vec<TableRow>, AppError>> + Send;

    /// The stage list (all rounds) of a league season.
    fn fetch_groups(
        &self,
        shortcut: &str,
        season: i32,
    ) -> impl Future<Output = Result<Vec<Group>, AppError>> + Send;

    /// All matches of the round with the given ordinal.
    fn fetch_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> impl Future<Output = Result<Vec<Match>, AppError>> + Send;

    /// Matches of a knockout stage round.
    ///
    /// Sources with a dedicated per-stage endpoint override this; by default it
    /// is the same as [`ResultsSource::fetch_matches`].
    fn fetch_round_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> impl Future<Output = Result<Vec<Match>, AppError>> + Send {
        self.fetch_matches(shortcut, season, ordinal)
    }

    /// Every league and season the API knows about.
    fn fetch_available_leagues(
        &self,
    ) -> impl Future<Output = Result<Vec<LeagueEntry>, AppError>> + Send;
}
