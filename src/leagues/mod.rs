//! Supported competitions, season arithmetic and league/season resolution.

pub mod catalog;
pub mod resolver;
pub mod season;

pub use catalog::{
    DEFAULT_LEAGUE, LEAGUE_GROUPS, LeagueGroupConfig, LeagueKey, LeagueShortcuts,
    resolve_effective_league_shortcut,
};
pub use resolver::{
    GroupedLeagues, LeagueContext, LeagueOption, available_group_keys,
    build_league_entries_by_group, build_league_options, classify_league_entry,
    is_football_league, keep_latest_season_only, matches_league_group, normalize_league_entries,
    pick_league_entry_for_season, resolve_league_context, resolve_league_selection,
    resolve_season_selection,
};
pub use season::{
    current_season_year, format_season_range, parse_season_value, resolve_seasons_from_leagues,
};
