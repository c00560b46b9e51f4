//! Next-round lookahead
//!
//! Once every match of the current round is finished, the next round to show
//! is the first round after it that actually has matches. The stage list can
//! be missing or stale, so candidates are probed one by one until a round
//! answers with matches.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::source::ResultsSource;
use crate::constants::reconcile::MAX_NEXT_GROUP_LOOKAHEAD;
use crate::data_fetcher::models::view::DEFAULT_NEXT_ROUND_LABEL;
use crate::data_fetcher::models::{Group, Match, NextRound};
use crate::data_fetcher::processors::{find_next_group, sort_all_goals};
use crate::error::AppError;

/// Result of probing the candidate rounds.
#[derive(Debug)]
pub enum LookaheadOutcome {
    /// A candidate answered with at least one match.
    Found(NextRound),
    /// Every candidate was empty or missing.
    Exhausted,
    /// A candidate failed with something other than 404; probing stopped.
    Failed(AppError),
}

/// Ordinals to probe for the next round, in priority order.
///
/// The stage-list successor of `current` comes first, then every other known
/// ordinal above `current` ascending, then the next
/// [`MAX_NEXT_GROUP_LOOKAHEAD`] consecutive ordinals. Duplicates keep their
/// first position.
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::next_round_candidates;
/// use matchday::data_fetcher::models::Group;
///
/// let groups = vec![Group::new("Matchday 5", 5), Group::new("Matchday 7", 7)];
/// let candidates = next_round_candidates(&groups, 5);
/// assert_eq!(candidates, vec![7, 6, 8, 9, 10, 11, 12, 13]);
/// ```
pub fn next_round_candidates(groups: &[Group], current: i32) -> Vec<i32> {
    let mut candidates = Vec::new();

    if let Some(next) = find_next_group(groups, Some(current)).and_then(Group::ordinal) {
        candidates.push(next);
    }

    let mut known: Vec<i32> = groups
        .iter()
        .filter_map(Group::ordinal)
        .filter(|ordinal| *ordinal > current)
        .collect();
    known.sort_unstable();
    candidates.extend(known);

    candidates.extend(
        (1..=MAX_NEXT_GROUP_LOOKAHEAD).filter_map(|offset| current.checked_add(offset)),
    );

    let mut seen = HashSet::new();
    candidates.retain(|ordinal| seen.insert(*ordinal));
    candidates
}

fn round_label(groups: &[Group], ordinal: i32) -> String {
    groups
        .iter()
        .find(|group| group.ordinal() == Some(ordinal))
        .and_then(|group| group.group_name.clone())
        .unwrap_or_else(|| DEFAULT_NEXT_ROUND_LABEL.to_string())
}

/// Probes `candidates` in order and stops at the first round with matches.
///
/// A 404 skips to the next candidate. Any other failure ends the probing.
///
/// # Arguments
/// * `source` - Results source
/// * `shortcut` - League data shortcut
/// * `season` - Season start year
/// * `candidates` - Ordinals from [`next_round_candidates`]
/// * `groups` - Stage list used for round labels
pub async fn probe_next_round<S: ResultsSource>(
    source: &S,
    shortcut: &str,
    season: i32,
    candidates: &[i32],
    groups: &[Group],
) -> LookaheadOutcome {
    for &ordinal in candidates {
        let matches: Vec<Match> = match source.fetch_matches(shortcut, season, ordinal).await {
            Ok(matches) => matches,
            Err(e) if e.is_not_found() => {
                debug!("Round {ordinal} does not exist, trying next candidate");
                continue;
            }
            Err(e) => {
                warn!("Lookahead stopped at round {}: {}", ordinal, e);
                return LookaheadOutcome::Failed(e);
            }
        };

        if matches.is_empty() {
            debug!("Round {ordinal} has no matches");
            continue;
        }

        info!("Next round is {} with {} matches", ordinal, matches.len());
        return LookaheadOutcome::Found(NextRound {
            name: round_label(groups, ordinal),
            order_id: ordinal,
            matches: sort_all_goals(matches),
        });
    }

    debug!("No next round found after {} candidates", candidates.len());
    LookaheadOutcome::Exhausted
}
