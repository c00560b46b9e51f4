//! Season arithmetic

use crate::data_fetcher::models::{LeagueEntry, SeasonValue};
use chrono::{Datelike, NaiveDate};

/// Month in which a new football season starts.
const SEASON_START_MONTH: u32 = 7;

/// Returns the season year a date belongs to. Seasons start in July.
pub fn current_season_year(today: NaiveDate) -> i32 {
    if today.month() >= SEASON_START_MONTH {
        today.year()
    } else {
        today.year() - 1
    }
}

/// Reads a season from the listing; anything unreadable becomes 0.
pub fn parse_season_value(raw: Option<&SeasonValue>) -> i32 {
    match raw {
        Some(SeasonValue::Number(value)) => i32::try_from(*value).unwrap_or(0),
        Some(SeasonValue::Text(text)) => parse_leading_int(text).unwrap_or(0),
        None => 0,
    }
}

/// Parses the leading integer of a string the way a lenient form field would.
pub(crate) fn parse_leading_int(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|value| sign * value)
}

/// Distinct positive seasons of the entries, newest first.
pub fn resolve_seasons_from_leagues(entries: &[LeagueEntry]) -> Vec<i32> {
    let mut seasons: Vec<i32> = entries
        .iter()
        .map(|entry| parse_season_value(entry.league_season.as_ref()))
        .filter(|season| *season > 0)
        .collect();
    seasons.sort_unstable_by(|a, b| b.cmp(a));
    seasons.dedup();
    seasons
}

/// Formats `2025` as `2025/2026`; empty for missing seasons.
pub fn format_season_range(season: Option<i32>) -> String {
    match season.filter(|season| *season > 0) {
        Some(season) => season
            .checked_add(1)
            .map(|next| format!("{}/{}", season, next))
            .unwrap_or_default(),
        None => String::new(),
    }
}
