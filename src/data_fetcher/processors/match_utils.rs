//! Pure helpers over matches and rounds

use crate::data_fetcher::models::{Group, Match};
use crate::data_fetcher::models::matches::parse_timestamp_ms;
use chrono::DateTime;

/// Round-name fragments that mark a knockout stage, German and English.
const KNOCKOUT_PATTERNS: [&str; 9] = [
    "achtelfinale",
    "viertelfinale",
    "halbfinale",
    "finale",
    "round of 16",
    "quarter",
    "semi",
    "final",
    "playoff",
];

/// Returns the match with its goals in chronological order.
///
/// The sort is stable, so goals in the same minute keep their API order.
/// Goals without a minute count as minute 0.
pub fn sort_goals(mut game: Match) -> Match {
    if game.goals.len() >= 2 {
        game.goals.sort_by_key(|goal| goal.match_minute.unwrap_or(0));
    }
    game
}

/// Applies [`sort_goals`] to every match.
pub fn sort_all_goals(matches: Vec<Match>) -> Vec<Match> {
    matches.into_iter().map(sort_goals).collect()
}

pub fn is_knockout_group(name: Option<&str>) -> bool {
    let value = name.unwrap_or_default().to_lowercase();
    KNOCKOUT_PATTERNS
        .iter()
        .any(|pattern| value.contains(pattern))
}

/// True when there is at least one match and all of them are finished.
pub fn are_all_matches_finished(matches: &[Match]) -> bool {
    !matches.is_empty() && matches.iter().all(Match::is_finished)
}

/// Finds the group with the smallest ordinal strictly greater than `current`.
///
/// # Arguments
/// * `groups` - Stage list in any order
/// * `current` - Ordinal of the current round; `None` or 0 yields `None`
pub fn find_next_group(groups: &[Group], current: Option<i32>) -> Option<&Group> {
    let current = current.filter(|ordinal| *ordinal != 0)?;
    groups
        .iter()
        .filter(|group| group.group_order_id.is_some_and(|ordinal| ordinal > current))
        .min_by_key(|group| group.group_order_id)
}

/// Formats a kickoff like `Sat, Aug 23, 18:30`, or `TBD` when unknown.
pub fn format_kickoff(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp_ms)
        .and_then(DateTime::from_timestamp_millis)
        .map(|kickoff| kickoff.format("%a, %b %-d, %H:%M").to_string())
        .unwrap_or_else(|| "TBD".to_string())
}
