//! Resolves the requested league and season against the league listing

use super::catalog::{
    DEFAULT_LEAGUE, LEAGUE_GROUPS, LeagueGroupConfig, LeagueKey, resolve_effective_league_shortcut,
};
use super::season::{
    current_season_year, format_season_range, parse_leading_int, parse_season_value,
    resolve_seasons_from_leagues,
};
use crate::data_fetcher::models::LeagueEntry;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Listing entries attributed to each supported competition.
pub type GroupedLeagues = BTreeMap<LeagueKey, Vec<LeagueEntry>>;

/// A selectable competition with its available seasons, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueOption {
    pub shortcut: LeagueKey,
    pub label: String,
    pub seasons: Vec<i32>,
}

/// Everything the orchestrator needs to know about the selected competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueContext {
    pub league: LeagueKey,
    pub season: i32,
    pub effective_shortcut: String,
    pub label: String,
    pub options: Vec<LeagueOption>,
}

pub fn normalize_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

pub fn is_football_league(entry: &LeagueEntry) -> bool {
    let sport_name = normalize_text(
        entry
            .sport
            .as_ref()
            .and_then(|sport| sport.sport_name.as_deref()),
    );
    sport_name.contains("fußball")
        || sport_name.contains("fussball")
        || sport_name.contains("football")
}

/// A shortcut needle matches when it is the whole shortcut or is followed by a
/// non-alphanumeric separator (`bl1/arena` is a Bundesliga entry, `bl1fan` is not).
fn shortcut_matches(shortcut: &str, needle: &str) -> bool {
    match shortcut.strip_prefix(needle) {
        Some(rest) => rest.chars().next().is_none_or(|c| !c.is_alphanumeric()),
        None => false,
    }
}

/// Strength of the best needle of `group` matching the entry.
///
/// Shortcut hits outrank name hits; within a kind, longer needles are more specific.
fn match_strength(entry: &LeagueEntry, group: &LeagueGroupConfig) -> Option<(bool, usize)> {
    let league_name = normalize_text(entry.league_name.as_deref());
    let league_shortcut = normalize_text(entry.league_shortcut.as_deref());

    let shortcut_hit = group
        .shortcut_match
        .iter()
        .filter(|needle| shortcut_matches(&league_shortcut, needle))
        .map(|needle| needle.len())
        .max();
    if let Some(len) = shortcut_hit {
        return Some((true, len));
    }

    group
        .name_match
        .iter()
        .filter(|needle| league_name.contains(*needle))
        .map(|needle| (false, needle.len()))
        .max()
}

pub fn matches_league_group(entry: &LeagueEntry, key: LeagueKey) -> bool {
    match_strength(entry, key.config()).is_some()
}

/// Picks the competition an entry belongs to, if any.
pub fn classify_league_entry(entry: &LeagueEntry) -> Option<LeagueKey> {
    let mut best: Option<((bool, usize), LeagueKey)> = None;
    for group in &LEAGUE_GROUPS {
        if let Some(strength) = match_strength(entry, group)
            && best.is_none_or(|(current, _)| strength > current)
        {
            best = Some((strength, group.key));
        }
    }
    best.map(|(_, key)| key)
}

/// Groups football entries with a shortcut and a season by competition.
///
/// Every supported competition is present in the result, possibly empty.
pub fn build_league_entries_by_group(entries: &[LeagueEntry]) -> GroupedLeagues {
    let mut grouped: GroupedLeagues = LEAGUE_GROUPS
        .iter()
        .map(|group| (group.key, Vec::new()))
        .collect();

    for entry in entries {
        if entry.league_shortcut.is_none()
            || entry.league_season.is_none()
            || !is_football_league(entry)
        {
            continue;
        }

        if let Some(key) = classify_league_entry(entry) {
            grouped.entry(key).or_default().push(entry.clone());
        }
    }

    grouped
}

/// Drops every entry that is not from the newest season present.
pub fn keep_latest_season_only(entries: Vec<LeagueEntry>) -> Vec<LeagueEntry> {
    let Some(latest) = resolve_seasons_from_leagues(&entries).first().copied() else {
        return entries;
    };
    entries
        .into_iter()
        .filter(|entry| parse_season_value(entry.league_season.as_ref()) == latest)
        .collect()
}

/// Groups the listing and applies per-competition clean-up.
pub fn normalize_league_entries(entries: &[LeagueEntry]) -> GroupedLeagues {
    build_league_entries_by_group(entries)
        .into_iter()
        .map(|(key, entries)| {
            let entries = if key == LeagueKey::Bl2 {
                keep_latest_season_only(entries)
            } else {
                entries
            };
            (key, entries)
        })
        .collect()
}

/// Entry for the season with the shortest (then alphabetically first) shortcut.
pub fn pick_league_entry_for_season(entries: &[LeagueEntry], season: i32) -> Option<&LeagueEntry> {
    entries
        .iter()
        .filter(|entry| parse_season_value(entry.league_season.as_ref()) == season)
        .min_by(|a, b| {
            let a_shortcut = a.league_shortcut.as_deref().unwrap_or_default();
            let b_shortcut = b.league_shortcut.as_deref().unwrap_or_default();
            a_shortcut
                .len()
                .cmp(&b_shortcut.len())
                .then_with(|| a_shortcut.cmp(b_shortcut))
        })
}

pub fn available_group_keys(grouped: &GroupedLeagues) -> Vec<LeagueKey> {
    LEAGUE_GROUPS
        .iter()
        .map(|group| group.key)
        .filter(|key| grouped.get(key).is_some_and(|entries| !entries.is_empty()))
        .collect()
}

/// Requested league if known and available, else the first available one.
pub fn resolve_league_selection(requested: Option<&str>, available: &[LeagueKey]) -> LeagueKey {
    let fallback = available.first().copied().unwrap_or(DEFAULT_LEAGUE);
    requested
        .and_then(|value| value.parse::<LeagueKey>().ok())
        .filter(|key| available.contains(key))
        .unwrap_or(fallback)
}

/// Requested season if the competition has it, else its newest season, else `fallback_year`.
pub fn resolve_season_selection(
    requested: Option<&str>,
    entries: &[LeagueEntry],
    fallback_year: i32,
) -> i32 {
    let seasons = resolve_seasons_from_leagues(entries);
    if let Some(requested) = requested.and_then(parse_leading_int)
        && seasons.contains(&requested)
    {
        return requested;
    }
    seasons.first().copied().unwrap_or(fallback_year)
}

pub fn build_league_options(
    available: &[LeagueKey],
    grouped: &GroupedLeagues,
    season_overrides: &HashMap<LeagueKey, i32>,
) -> Vec<LeagueOption> {
    available
        .iter()
        .map(|&key| {
            let entries = grouped.get(&key).map(Vec::as_slice).unwrap_or_default();
            let seasons = match season_overrides.get(&key) {
                Some(season) => vec![*season],
                None => resolve_seasons_from_leagues(entries),
            };
            let latest_season = seasons.first().copied();
            let season_label = format_season_range(latest_season);
            let base_label = key.label();

            LeagueOption {
                shortcut: key,
                label: if season_label.is_empty() {
                    base_label.to_string()
                } else {
                    format!("{base_label} {season_label}")
                },
                seasons,
            }
        })
        .collect()
}

/// Resolves league, season and data shortcut from the raw league listing.
///
/// # Arguments
/// * `entries` - The available leagues listing
/// * `requested_league` - League key asked for by the caller, if any
/// * `requested_season` - Season asked for by the caller, if any
/// * `today` - Date used when no season can be derived from the listing
pub fn resolve_league_context(
    entries: &[LeagueEntry],
    requested_league: Option<&str>,
    requested_season: Option<&str>,
    today: NaiveDate,
) -> LeagueContext {
    let grouped = normalize_league_entries(entries);
    let available = available_group_keys(&grouped);
    let league = resolve_league_selection(requested_league, &available);

    let league_entries = grouped.get(&league).map(Vec::as_slice).unwrap_or_default();
    let season = resolve_season_selection(
        requested_season,
        league_entries,
        current_season_year(today),
    );

    let entry_for_season = pick_league_entry_for_season(league_entries, season);
    let effective_shortcut = resolve_effective_league_shortcut(
        league,
        entry_for_season.and_then(|entry| entry.league_shortcut.as_deref()),
    );

    let options = build_league_options(&available, &grouped, &HashMap::new());
    let label = options
        .iter()
        .find(|option| option.shortcut == league)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| league.label().to_string());

    debug!(
        "Resolved league {} season {} (shortcut {}, {} competitions available)",
        league,
        season,
        effective_shortcut,
        available.len()
    );

    LeagueContext {
        league,
        season,
        effective_shortcut,
        label,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{SeasonValue, Sport};

    fn league(shortcut: &str, name: &str, season: i64, sport: &str) -> LeagueEntry {
        LeagueEntry {
            league_id: None,
            league_name: Some(name.to_string()),
            league_season: Some(SeasonValue::Number(season)),
            league_shortcut: Some(shortcut.to_string()),
            sport: Some(Sport {
                sport_id: Some(1),
                sport_name: Some(sport.to_string()),
            }),
        }
    }

    fn shortcuts(grouped: &GroupedLeagues, key: LeagueKey) -> Vec<String> {
        grouped[&key]
            .iter()
            .filter_map(|entry| entry.league_shortcut.clone())
            .collect()
    }

    #[test]
    fn test_shortcut_wins_over_broad_name_match() {
        let leagues = vec![
            league("bl2", "2. Fußball-Bundesliga 2025/2026", 2025, "Fußball"),
            league("bl1", "Fußball-Bundesliga 2025/2026", 2025, "Fußball"),
        ];

        let grouped = build_league_entries_by_group(&leagues);

        assert_eq!(shortcuts(&grouped, LeagueKey::Bl2), vec!["bl2"]);
        assert_eq!(shortcuts(&grouped, LeagueKey::Bl1), vec!["bl1"]);
    }

    #[test]
    fn test_women_bundesliga_shortcuts_map_to_dedicated_groups() {
        let leagues = vec![
            league("fbl1", "1. Frauen-Bundesliga 2025", 2025, "Fußball"),
            league("fbl2", "2. Frauen-Bundesliga 2025", 2025, "Fußball"),
        ];

        let grouped = build_league_entries_by_group(&leagues);

        assert_eq!(shortcuts(&grouped, LeagueKey::Fbl1), vec!["fbl1"]);
        assert_eq!(shortcuts(&grouped, LeagueKey::Fbl2), vec!["fbl2"]);
    }

    #[test]
    fn test_most_specific_shortcut_match() {
        let leagues = vec![
            league("bl1f", "1. Frauen-Bundesliga", 2023, "Frauenfußball"),
            league("bl2f", "2. Frauen-Bundesliga", 2024, "Frauenfußball"),
            league("bl1fan", "1. Fußball-Fan-Bundesliga 2022/2023", 2022, "Fußball"),
            league("bl1/arena", "1. Fußball-Bundesliga 2018/2019 (Arena)", 2018, "Fußball"),
        ];

        let grouped = build_league_entries_by_group(&leagues);

        assert_eq!(shortcuts(&grouped, LeagueKey::Fbl1), vec!["bl1f"]);
        assert_eq!(shortcuts(&grouped, LeagueKey::Fbl2), vec!["bl2f"]);
        assert!(shortcuts(&grouped, LeagueKey::Bl1).contains(&"bl1/arena".to_string()));
        assert!(grouped[&LeagueKey::Bl2].is_empty());
    }

    #[test]
    fn test_non_football_and_incomplete_entries_are_skipped() {
        let mut no_season = league("bl1", "Bundesliga", 2024, "Fußball");
        no_season.league_season = None;
        let leagues = vec![
            league("bl1", "Handball-Bundesliga", 2024, "Handball"),
            no_season,
        ];

        let grouped = build_league_entries_by_group(&leagues);
        assert!(grouped.values().all(Vec::is_empty));
        assert_eq!(grouped.len(), LEAGUE_GROUPS.len());
    }

    #[test]
    fn test_keep_latest_season_only() {
        let entries = vec![
            league("bl2", "2. Bundesliga", 2023, "Fußball"),
            league("bl2", "2. Bundesliga", 2025, "Fußball"),
            league("bl2", "2. Bundesliga", 2024, "Fußball"),
        ];
        let kept = keep_latest_season_only(entries);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            parse_season_value(kept[0].league_season.as_ref()),
            2025
        );
    }

    #[test]
    fn test_pick_league_entry_prefers_short_shortcut() {
        let entries = vec![
            league("ucl2024", "Champions League", 2024, "Fußball"),
            league("ucl", "Champions League", 2024, "Fußball"),
            league("cl", "Champions League", 2023, "Fußball"),
        ];
        let picked = pick_league_entry_for_season(&entries, 2024).unwrap();
        assert_eq!(picked.league_shortcut.as_deref(), Some("ucl"));
        assert!(pick_league_entry_for_season(&entries, 2020).is_none());
    }

    #[test]
    fn test_resolve_league_selection_falls_back() {
        let available = [LeagueKey::Bl1, LeagueKey::Cl];
        assert_eq!(resolve_league_selection(Some("bl1"), &available), LeagueKey::Bl1);
        assert_eq!(resolve_league_selection(Some("cl"), &available), LeagueKey::Cl);
        assert_eq!(resolve_league_selection(Some("pl"), &available), LeagueKey::Bl1);
        assert_eq!(resolve_league_selection(Some("dfb"), &available), LeagueKey::Bl1);
        assert_eq!(resolve_league_selection(None, &[]), DEFAULT_LEAGUE);
    }

    #[test]
    fn test_resolve_season_selection_prefers_requested() {
        let entries = vec![
            league("bl1", "Bundesliga", 2025, "Fußball"),
            league("bl1", "Bundesliga", 2024, "Fußball"),
        ];
        assert_eq!(resolve_season_selection(Some("2024"), &entries, 2026), 2024);
    }

    #[test]
    fn test_resolve_season_selection_falls_back_to_latest() {
        let entries = vec![
            league("bl1", "Bundesliga", 2023, "Fußball"),
            league("bl1", "Bundesliga", 2025, "Fußball"),
            league("bl1", "Bundesliga", 2024, "Fußball"),
        ];
        assert_eq!(resolve_season_selection(Some("1999"), &entries, 2026), 2025);
        assert_eq!(resolve_season_selection(None, &[], 2026), 2026);
    }

    #[test]
    fn test_build_league_options_labels() {
        let leagues = vec![
            league("bl1", "Bundesliga", 2025, "Fußball"),
            league("bl1", "Bundesliga", 2024, "Fußball"),
            league("dfb", "DFB-Pokal", 2025, "Fußball"),
        ];
        let grouped = build_league_entries_by_group(&leagues);
        let available = available_group_keys(&grouped);
        assert_eq!(available, vec![LeagueKey::Bl1, LeagueKey::Dfb]);

        let mut overrides = HashMap::new();
        overrides.insert(LeagueKey::Dfb, 2020);
        let options = build_league_options(&available, &grouped, &overrides);

        assert_eq!(options[0].label, "Bundesliga 2025/2026");
        assert_eq!(options[0].seasons, vec![2025, 2024]);
        assert_eq!(options[1].label, "DFB-Pokal 2020/2021");
        assert_eq!(options[1].seasons, vec![2020]);
    }

    #[test]
    fn test_resolve_league_context() {
        let leagues = vec![
            league("bl1", "Fußball-Bundesliga 2025/2026", 2025, "Fußball"),
            league("ucl", "UEFA Champions League 2025/2026", 2025, "Fußball"),
            league("ucl", "UEFA Champions League 2024/2025", 2024, "Fußball"),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let context = resolve_league_context(&leagues, Some("cl"), Some("2024"), today);
        assert_eq!(context.league, LeagueKey::Cl);
        assert_eq!(context.season, 2024);
        assert_eq!(context.effective_shortcut, "ucl");
        assert_eq!(context.label, "Champions League 2025/2026");
        assert_eq!(context.options.len(), 2);

        let fallback = resolve_league_context(&[], Some("cl"), None, today);
        assert_eq!(fallback.league, DEFAULT_LEAGUE);
        assert_eq!(fallback.season, 2025);
        assert_eq!(fallback.effective_shortcut, "bl1");
        assert_eq!(fallback.label, "Bundesliga");
    }
}
