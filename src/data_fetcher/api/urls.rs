//! URL building utilities for the results API endpoints

/// Builds the URL of the round currently in play for a league.
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::build_current_group_url;
///
/// let url = build_current_group_url("https://api.example.com", "bl1");
/// assert_eq!(url, "https://api.example.com/getcurrentgroup/bl1");
/// ```
pub fn build_current_group_url(api_domain: &str, shortcut: &str) -> String {
    format!("{api_domain}/getcurrentgroup/{shortcut}")
}

/// Builds the standings URL of a league season.
///
/// # Arguments
/// * `api_domain` - The base API domain
/// * `shortcut` - League shortcut, e.g. `bl1`
/// * `season` - Season start year
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::build_table_url;
///
/// let url = build_table_url("https://api.example.com", "bl1", 2025);
/// assert_eq!(url, "https://api.example.com/getbltable/bl1/2025");
/// ```
pub fn build_table_url(api_domain: &str, shortcut: &str, season: i32) -> String {
    format!("{api_domain}/getbltable/{shortcut}/{season}")
}

/// Builds the stage list URL of a league season.
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::build_groups_url;
///
/// let url = build_groups_url("https://api.example.com", "cl", 2024);
/// assert_eq!(url, "https://api.example.com/getgroups/cl/2024");
/// ```
pub fn build_groups_url(api_domain: &str, shortcut: &str, season: i32) -> String {
    format!("{api_domain}/getgroups/{shortcut}/{season}")
}

/// Builds the URL of all matches of one round.
///
/// # Arguments
/// * `api_domain` - The base API domain
/// * `shortcut` - League shortcut
/// * `season` - Season start year
/// * `ordinal` - Round ordinal (`groupOrderID`)
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::build_match_data_url;
///
/// let url = build_match_data_url("https://api.example.com", "bl1", 2025, 7);
/// assert_eq!(url, "https://api.example.com/getmatchdata/bl1/2025/7");
/// ```
pub fn build_match_data_url(api_domain: &str, shortcut: &str, season: i32, ordinal: i32) -> String {
    format!("{api_domain}/getmatchdata/{shortcut}/{season}/{ordinal}")
}

/// Builds the by-group match URL. Note the ordinal comes before the season here.
///
/// # Example
/// ```
/// use matchday::data_fetcher::api::build_match_by_group_url;
///
/// let url = build_match_by_group_url("https://api.example.com", "cl", 2024, 12);
/// assert_eq!(url, "https://api.example.com/getmatchbygroup/cl/12/2024");
/// ```
pub fn build_match_by_group_url(
    api_domain: &str,
    shortcut: &str,
    season: i32,
    ordinal: i32,
) -> String {
    format!("{api_domain}/getmatchbygroup/{shortcut}/{ordinal}/{season}")
}

pub fn build_available_leagues_url(api_domain: &str) -> String {
    format!("{api_domain}/getavailableleagues")
}
