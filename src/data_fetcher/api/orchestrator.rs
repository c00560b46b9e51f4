// src/data_fetcher/api/orchestrator.rs - Matchday reconciliation over independently failing fetches

use tracing::{debug, info, instrument, warn};

use super::bracket::build_bracket;
use super::lookahead::{LookaheadOutcome, next_round_candidates, probe_next_round};
use super::source::ResultsSource;
use crate::constants::reconcile::PLAYOFF_GROUP_ORDER_ID;
use crate::data_fetcher::models::view::DEFAULT_CURRENT_ROUND_LABEL;
use crate::data_fetcher::models::{
    CurrentRound, DataCategory, DataErrors, Group, NextRound, PartialReconciliation,
    Reconciliation,
};
use crate::data_fetcher::processors::{are_all_matches_finished, sort_all_goals};
use crate::error::AppError;
use crate::leagues::{LeagueKey, LeagueShortcuts};

/// Fetches the stage list, trying the dedicated stage-list shortcut first.
///
/// When the league has a separate stage-list shortcut and that lookup fails
/// for any reason, the data shortcut is tried instead and its outcome wins.
#[instrument(skip(source, shortcuts))]
pub async fn fetch_groups_with_fallback<S: ResultsSource>(
    source: &S,
    shortcuts: &LeagueShortcuts,
    season: i32,
) -> Result<Vec<Group>, AppError> {
    if let Some(primary) = shortcuts.groups_primary.as_deref() {
        match source.fetch_groups(primary, season).await {
            Ok(groups) => return Ok(groups),
            Err(e) => debug!(
                "Stage list for '{}' failed ({}), retrying with '{}'",
                primary, e, shortcuts.data
            ),
        }
    }

    source.fetch_groups(&shortcuts.data, season).await
}

/// Reconciles a league season using the shortcuts derived from its key.
///
/// See [`reconcile_with_shortcuts`].
pub async fn reconcile<S: ResultsSource>(
    source: &S,
    league: LeagueKey,
    season: i32,
) -> Result<Reconciliation, AppError> {
    reconcile_with_shortcuts(source, league, season, &LeagueShortcuts::for_league(league)).await
}

/// Produces one consistent view of a competition from independently failing fetches.
///
/// The current round, standings, stage list and seeded playoff round are
/// requested together. Every failure except a missing current round is
/// recorded as a [`DataCategory`] and degrades its data to empty. Once the
/// current round is fully finished, later rounds are probed for the next one
/// with matches.
///
/// # Arguments
/// * `source` - Results source
/// * `league` - Competition to reconcile
/// * `season` - Season start year
/// * `shortcuts` - API shortcuts of the competition
///
/// # Returns
/// * `Ok(Reconciliation)` - The consolidated view, with failed categories in `visible_errors`
/// * `Err(AppError::CurrentRoundMissing)` - No usable current round; carries the partial data
///
/// # Example
/// ```rust,no_run
/// use matchday::data_fetcher::api::{OpenLigaClient, reconcile};
/// use matchday::leagues::LeagueKey;
/// use matchday::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), matchday::AppError> {
///     let client = OpenLigaClient::from_config(&Config::default())?;
///     let view = reconcile(&client, LeagueKey::Bl1, 2025).await?;
///     println!("{}: {} matches", view.current_round.name, view.current_round.matches.len());
///     Ok(())
/// }
/// ```
#[instrument(skip(source, shortcuts), fields(shortcut = %shortcuts.data))]
pub async fn reconcile_with_shortcuts<S: ResultsSource>(
    source: &S,
    league: LeagueKey,
    season: i32,
    shortcuts: &LeagueShortcuts,
) -> Result<Reconciliation, AppError> {
    info!("Reconciling {} season {}", league, season);
    let mut errors = DataErrors::new();

    let table_fetch = async {
        if league.has_table() {
            source.fetch_table(&shortcuts.data, season).await
        } else {
            Ok(Vec::new())
        }
    };
    let groups_fetch = async {
        if league.has_bracket() {
            fetch_groups_with_fallback(source, shortcuts, season)
                .await
                .map(Some)
        } else {
            Ok(None)
        }
    };
    let playoff_fetch = async {
        if league.has_bracket() {
            source
                .fetch_matches(&shortcuts.seeded, season, PLAYOFF_GROUP_ORDER_ID)
                .await
        } else {
            Ok(Vec::new())
        }
    };

    let (current_result, table_result, groups_result, playoff_result) = tokio::join!(
        source.fetch_current_round(&shortcuts.data),
        table_fetch,
        groups_fetch,
        playoff_fetch,
    );

    let current_group = match current_result {
        Ok(group) => Some(group),
        Err(e) => {
            warn!("Failed to fetch current round: {}", e);
            errors.record(DataCategory::CurrentGroup);
            None
        }
    };

    let table = match table_result {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to fetch table: {}", e);
            errors.record(DataCategory::Table);
            Vec::new()
        }
    };

    let groups = match groups_result {
        Ok(Some(groups)) => groups,
        Ok(None) => Vec::new(),
        Err(e) if e.is_not_found() => {
            debug!("No stage list published yet");
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to fetch stage list: {}", e);
            errors.record(DataCategory::Groups);
            Vec::new()
        }
    };

    let playoff_matches = match playoff_result {
        Ok(matches) => sort_all_goals(matches),
        Err(e) => {
            warn!("Failed to fetch seeded playoff round: {}", e);
            errors.record(DataCategory::Playoffs);
            Vec::new()
        }
    };

    let Some((current_group, current_ordinal)) = current_group
        .and_then(|group| group.ordinal().map(|ordinal| (group, ordinal)))
    else {
        warn!(
            "No usable current round for '{}', aborting reconciliation",
            shortcuts.data
        );
        return Err(AppError::current_round_missing(
            shortcuts.data.clone(),
            PartialReconciliation {
                table,
                groups,
                playoff_matches,
                visible_errors: errors.into_vec(),
            },
        ));
    };

    debug!("Current round ordinal is {current_ordinal}");

    let (matchday_result, bracket) = tokio::join!(
        source.fetch_matches(&shortcuts.data, season, current_ordinal),
        build_bracket(source, &shortcuts.data, season, &groups, playoff_matches),
    );

    let matches = match matchday_result {
        Ok(matches) => sort_all_goals(matches),
        Err(e) => {
            warn!("Failed to fetch matches of round {}: {}", current_ordinal, e);
            errors.record(DataCategory::Matchday);
            Vec::new()
        }
    };

    let next_round = if are_all_matches_finished(&matches) {
        find_next_round(source, shortcuts, season, current_ordinal, &groups, &mut errors).await
    } else {
        None
    };

    if bracket.failed_rounds > 0 {
        errors.record(DataCategory::KnockoutRounds);
    }

    let visible_errors = errors.into_vec();
    info!(
        "Reconciled {} round {}: {} matches, next round {}, {} bracket rounds, {} failed categories",
        league,
        current_ordinal,
        matches.len(),
        next_round
            .as_ref()
            .map_or_else(|| "none".to_string(), |next| next.order_id.to_string()),
        bracket.rounds.len(),
        visible_errors.len()
    );

    Ok(Reconciliation {
        league,
        season,
        current_round: CurrentRound {
            name: current_group
                .group_name
                .unwrap_or_else(|| DEFAULT_CURRENT_ROUND_LABEL.to_string()),
            order_id: current_ordinal,
            matches,
        },
        next_round,
        table,
        bracket: bracket.rounds,
        visible_errors,
    })
}

/// Looks for the first round after `current_ordinal` that has matches.
async fn find_next_round<S: ResultsSource>(
    source: &S,
    shortcuts: &LeagueShortcuts,
    season: i32,
    current_ordinal: i32,
    known_groups: &[Group],
    errors: &mut DataErrors,
) -> Option<NextRound> {
    let refetched;
    let schedule_groups = if known_groups.is_empty() {
        refetched = match fetch_groups_with_fallback(source, shortcuts, season).await {
            Ok(groups) => groups,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => {
                warn!("Failed to fetch stage list for lookahead: {}", e);
                errors.record(DataCategory::NextGroups);
                Vec::new()
            }
        };
        refetched.as_slice()
    } else {
        known_groups
    };

    let candidates = next_round_candidates(schedule_groups, current_ordinal);
    debug!("Lookahead candidates: {:?}", candidates);

    match probe_next_round(source, &shortcuts.data, season, &candidates, schedule_groups).await {
        LookaheadOutcome::Found(next) => Some(next),
        LookaheadOutcome::Exhausted => None,
        LookaheadOutcome::Failed(_) => {
            errors.record(DataCategory::NextMatchday);
            None
        }
    }
}
