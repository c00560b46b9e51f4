use crate::error::AppError;

/// Validates the configuration settings
///
/// # Arguments
/// * `api_domain` - The API domain to validate
/// * `http_timeout_seconds` - Request timeout
/// * `log_file_path` - Optional log file path to validate
///
/// # Validation Rules
/// - API domain cannot be empty
/// - API domain must be a valid URL or domain name
/// - Timeout must be at least one second
/// - If log file path is provided, it cannot be empty
pub fn validate_config(
    api_domain: &str,
    http_timeout_seconds: u64,
    log_file_path: Option<&str>,
) -> Result<(), AppError> {
    if api_domain.trim().is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    let host = api_domain
        .strip_prefix("https://")
        .or_else(|| api_domain.strip_prefix("http://"))
        .unwrap_or(api_domain);
    if host.is_empty()
        || host.contains(char::is_whitespace)
        || (!host.contains('.') && !host.starts_with("localhost") && !host.starts_with("127."))
    {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if log_file_path.is_some_and(|path| path.trim().is_empty()) {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config("https://api.openligadb.de", 30, None).is_ok());
        assert!(validate_config("api.openligadb.de", 5, Some("/tmp/matchday.log")).is_ok());
        assert!(validate_config("http://localhost:8080", 1, None).is_ok());
        assert!(validate_config("http://127.0.0.1:39201", 1, None).is_ok());
    }

    #[test]
    fn test_invalid_domains() {
        assert!(validate_config("", 30, None).is_err());
        assert!(validate_config("https://", 30, None).is_err());
        assert!(validate_config("not a domain", 30, None).is_err());
        assert!(validate_config("openligadb", 30, None).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let error = validate_config("https://api.openligadb.de", 0, None).unwrap_err();
        assert!(error.to_string().contains("timeout"));
    }

    #[test]
    fn test_empty_log_path_rejected() {
        assert!(validate_config("https://api.openligadb.de", 30, Some("  ")).is_err());
    }
}
