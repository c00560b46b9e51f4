//! Application-wide constants and configuration values
//!
//! This module centralizes the magic numbers of the results client and the
//! reconciliation pipeline.

/// Default results API domain
pub const DEFAULT_API_DOMAIN: &str = "https://api.openligadb.de";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Number of characters of a failed response body written to the log
pub const RESPONSE_PREVIEW_CHARS: usize = 200;

/// Reconciliation tuning
pub mod reconcile {
    /// Ordinal of the pre-scheduled playoff round of bracket competitions
    pub const PLAYOFF_GROUP_ORDER_ID: i32 = 9;

    /// Group id given to the synthetic playoff round
    pub const PLAYOFF_GROUP_ID: i64 = 9;

    /// Display name of the synthetic playoff round
    pub const PLAYOFF_GROUP_NAME: &str = "Playoffs";

    /// Consecutive ordinals after the current one probed when looking for the next round
    pub const MAX_NEXT_GROUP_LOOKAHEAD: i32 = 8;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "MATCHDAY_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "MATCHDAY_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "MATCHDAY_HTTP_TIMEOUT";
}
