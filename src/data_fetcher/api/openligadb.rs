//! OpenLigaDB implementation of the results source

use reqwest::Client;
use tracing::{debug, instrument};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::source::ResultsSource;
use super::urls::{
    build_available_leagues_url, build_current_group_url, build_groups_url,
    build_match_by_group_url, build_match_data_url, build_table_url,
};
use crate::config::Config;
use crate::data_fetcher::models::{Group, LeagueEntry, Match, TableRow};
use crate::error::AppError;

/// Results client for the OpenLigaDB REST API.
#[derive(Debug, Clone)]
pub struct OpenLigaClient {
    client: Client,
    api_domain: String,
}

impl OpenLigaClient {
    /// Creates a client over an existing HTTP client.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `api_domain` - Base URL without trailing slash, e.g. `https://api.openligadb.de`
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        let api_domain = api_domain.into();
        OpenLigaClient {
            client,
            api_domain: api_domain.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client with its own HTTP client configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_domain.clone()))
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }
}

impl ResultsSource for OpenLigaClient {
    async fn fetch_current_round(&self, shortcut: &str) -> Result<Group, AppError> {
        fetch(&self.client, &build_current_group_url(&self.api_domain, shortcut)).await
    }

    async fn fetch_table(&self, shortcut: &str, season: i32) -> Result<Vec<TableRow>, AppError> {
        fetch(&self.client, &build_table_url(&self.api_domain, shortcut, season)).await
    }

    async fn fetch_groups(&self, shortcut: &str, season: i32) -> Result<Vec<Group>, AppError> {
        fetch(&self.client, &build_groups_url(&self.api_domain, shortcut, season)).await
    }

    async fn fetch_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> Result<Vec<Match>, AppError> {
        let url = build_match_data_url(&self.api_domain, shortcut, season, ordinal);
        fetch(&self.client, &url).await
    }

    /// Tries the by-group endpoint first and falls back to the matchday
    /// endpoint on any failure.
    #[instrument(skip(self))]
    async fn fetch_round_matches(
        &self,
        shortcut: &str,
        season: i32,
        ordinal: i32,
    ) -> Result<Vec<Match>, AppError> {
        let url = build_match_by_group_url(&self.api_domain, shortcut, season, ordinal);
        match fetch(&self.client, &url).await {
            Ok(matches) => Ok(matches),
            Err(e) => {
                debug!("By-group lookup failed ({e}), falling back to matchday endpoint");
                self.fetch_matches(shortcut, season, ordinal).await
            }
        }
    }

    async fn fetch_available_leagues(&self) -> Result<Vec<LeagueEntry>, AppError> {
        fetch(&self.client, &build_available_leagues_url(&self.api_domain)).await
    }
}
