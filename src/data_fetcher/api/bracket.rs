//! Knockout bracket assembly

use futures::future::join_all;
use tracing::{debug, warn};

use super::source::ResultsSource;
use crate::constants::reconcile::{PLAYOFF_GROUP_ID, PLAYOFF_GROUP_NAME};
use crate::data_fetcher::models::{BracketRound, Group, Match};
use crate::data_fetcher::processors::{
    group_knockout_matches_by_tie, is_knockout_group, sort_all_goals,
};

/// Bracket rounds plus how many stage round fetches failed.
#[derive(Debug, Default)]
pub struct BracketOutcome {
    pub rounds: Vec<BracketRound>,
    pub failed_rounds: usize,
}

fn bracket_round(group: Group, matches: Vec<Match>) -> BracketRound {
    let ties = group_knockout_matches_by_tie(&matches);
    BracketRound {
        group,
        matches,
        ties,
    }
}

/// The synthetic round holding pre-scheduled playoff matches.
pub fn playoff_round(playoff_matches: Vec<Match>) -> BracketRound {
    let group = Group {
        group_name: Some(PLAYOFF_GROUP_NAME.to_string()),
        group_order_id: None,
        group_id: Some(PLAYOFF_GROUP_ID),
    };
    bracket_round(group, playoff_matches)
}

/// Builds the knockout bracket of a competition.
///
/// Seeded playoff matches take precedence: when present they form the whole
/// bracket and no stage round is fetched. Otherwise every knockout stage of
/// `groups` is fetched concurrently; a failed stage degrades to an empty round.
///
/// # Arguments
/// * `source` - Results source
/// * `shortcut` - League data shortcut the rounds are fetched with
/// * `season` - Season start year
/// * `groups` - Stage list of the competition
/// * `playoff_matches` - Matches of the seeded playoff round, goals already sorted
pub async fn build_bracket<S: ResultsSource>(
    source: &S,
    shortcut: &str,
    season: i32,
    groups: &[Group],
    playoff_matches: Vec<Match>,
) -> BracketOutcome {
    if !playoff_matches.is_empty() {
        debug!(
            "Using {} seeded playoff matches as the bracket",
            playoff_matches.len()
        );
        return BracketOutcome {
            rounds: vec![playoff_round(playoff_matches)],
            failed_rounds: 0,
        };
    }

    let knockout_groups: Vec<&Group> = groups
        .iter()
        .filter(|group| is_knockout_group(group.group_name.as_deref()))
        .collect();

    if knockout_groups.is_empty() {
        return BracketOutcome::default();
    }

    debug!("Fetching {} knockout rounds", knockout_groups.len());

    let fetches = knockout_groups.iter().map(|group| async move {
        match group.ordinal() {
            Some(ordinal) => source.fetch_round_matches(shortcut, season, ordinal).await,
            None => Ok(Vec::new()),
        }
    });
    let results = join_all(fetches).await;

    let mut outcome = BracketOutcome::default();
    for (group, result) in knockout_groups.into_iter().zip(results) {
        let matches = match result {
            Ok(matches) => sort_all_goals(matches),
            Err(e) => {
                warn!(
                    "Failed to fetch knockout round {:?}: {}",
                    group.group_name, e
                );
                outcome.failed_rounds += 1;
                Vec::new()
            }
        };
        outcome.rounds.push(bracket_round(group.clone(), matches));
    }

    outcome
}
