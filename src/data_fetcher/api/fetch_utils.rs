//! Generic HTTP fetching with status mapping and response classification

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::constants::RESPONSE_PREVIEW_CHARS;
use crate::error::AppError;

/// Fetches a URL and decodes its JSON body.
///
/// Every request is issued exactly once. Non-success statuses become the
/// matching status-bearing [`AppError`] so callers can tell 404 apart from
/// other failures.
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `url` - URL to fetch data from
///
/// # Returns
/// * `Result<T, AppError>` - Parsed response data or error
#[instrument(skip(client))]
pub(crate) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("Fetching data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::ApiFetch(e)
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        // 404 is an expected answer for optional lookups, so keep it quiet.
        if status.as_u16() == 404 {
            debug!("HTTP 404 - {} (URL: {})", reason, url);
        } else {
            error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, url);
        }
        return Err(AppError::from_status(status.as_u16(), reason, url));
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    decode_response(&response_text, url)
}

/// Decodes a response body, telling empty, non-JSON and mis-shaped bodies apart.
pub(crate) fn decode_response<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first {} chars): {}",
                RESPONSE_PREVIEW_CHARS,
                body.chars().take(RESPONSE_PREVIEW_CHARS).collect::<String>()
            );

            let trimmed = body.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
