use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory.
const APP_DIR: &str = "matchday";

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> PathBuf {
    app_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path() {
        let config_path = get_config_path();
        assert!(config_path.to_string_lossy().contains("matchday"));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let log_dir_path = get_log_dir_path();
        assert!(log_dir_path.to_string_lossy().contains("matchday"));
        assert!(log_dir_path.ends_with("logs"));
    }
}
