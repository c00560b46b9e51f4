use matchday::AppError;
use std::io::stderr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default log file name when only a directory is known.
const LOG_FILE_NAME: &str = "matchday.log";

fn env_filter(debug: bool) -> Result<EnvFilter, AppError> {
    let directive = if debug {
        "matchday=debug"
    } else {
        "matchday=info"
    };
    let directive = directive
        .parse::<Directive>()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Sets up logging for the binary.
///
/// Logs always go to stderr so stdout stays clean for the view (and JSON).
/// With a log file, a non-blocking file layer is added as well.
///
/// # Arguments
/// * `debug` - Enables debug level for this crate
/// * `log_file` - Optional log file; its parent directory is created if missing
///
/// # Returns
/// The guard that must be kept alive for the duration of the program to
/// ensure the file layer is flushed, when a log file is used.
pub fn setup_logging(debug: bool, log_file: Option<&str>) -> Result<Option<WorkerGuard>, AppError> {
    let console_layer = fmt::Layer::new()
        .with_writer(stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(env_filter(debug)?);

    let Some(log_file) = log_file else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .map_err(|e| AppError::log_setup_error(e.to_string()))?;
        return Ok(None);
    };

    let path = Path::new(log_file);
    let log_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(LOG_FILE_NAME);

    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter(debug)?),
        )
        .try_init()
        .map_err(|e| AppError::log_setup_error(e.to_string()))?;

    Ok(Some(guard))
}
