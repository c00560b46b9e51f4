//! Home view loading: league resolution followed by reconciliation

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument};

use super::orchestrator::reconcile_with_shortcuts;
use super::source::ResultsSource;
use crate::data_fetcher::models::Reconciliation;
use crate::error::AppError;
use crate::leagues::{LeagueKey, LeagueOption, LeagueShortcuts, resolve_league_context};

/// Everything the home view shows for one competition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeData {
    pub league: LeagueKey,
    pub season: i32,
    /// Display label of the active competition, e.g. `Bundesliga 2025/2026`.
    pub label: String,
    pub options: Vec<LeagueOption>,
    pub reconciliation: Reconciliation,
}

/// Resolves the requested competition against the league listing and reconciles it.
///
/// Unknown or unavailable leagues fall back to the first available one, and
/// unknown seasons to the newest season of the competition.
///
/// # Arguments
/// * `source` - Results source
/// * `requested_league` - League key from the caller, e.g. `"cl"`
/// * `requested_season` - Season from the caller, e.g. `"2024"`
/// * `today` - Used for the season when the listing has none for the league
///
/// # Returns
/// * `Err` when the league listing cannot be fetched, or the current round is missing
#[instrument(skip(source, today))]
pub async fn load_home_data<S: ResultsSource>(
    source: &S,
    requested_league: Option<&str>,
    requested_season: Option<&str>,
    today: NaiveDate,
) -> Result<HomeData, AppError> {
    let entries = source.fetch_available_leagues().await?;
    info!("League listing has {} entries", entries.len());

    let context = resolve_league_context(&entries, requested_league, requested_season, today);
    let shortcuts = LeagueShortcuts::with_data_shortcut(context.league, &context.effective_shortcut);

    let reconciliation =
        reconcile_with_shortcuts(source, context.league, context.season, &shortcuts).await?;

    Ok(HomeData {
        league: context.league,
        season: context.season,
        label: context.label,
        options: context.options,
        reconciliation,
    })
}
