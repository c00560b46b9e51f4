use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use std::path::PathBuf;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Football matchday viewer
///
/// Shows the current round, the next round once the current one is complete,
/// the standings and the knockout bracket of German and European competitions,
/// using OpenLigaDB as the data source.
///
/// Data that fails to load is listed at the end of the output instead of
/// aborting the whole view.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Competition to show: bl1, bl2, fbl1, fbl2, dfb or cl.
    /// Falls back to the first available competition when unknown.
    #[arg(short = 'l', long = "league", help_heading = "Selection")]
    pub league: Option<String>,

    /// Season start year, e.g. 2025 for 2025/2026.
    /// Falls back to the newest season of the competition when unknown.
    #[arg(short = 's', long = "season", help_heading = "Selection")]
    pub season: Option<String>,

    /// Print the full view as JSON instead of plain text.
    #[arg(long = "json", help_heading = "Output")]
    pub json: bool,

    /// List the available competitions and their seasons, then exit.
    #[arg(long = "list-leagues", help_heading = "Output")]
    pub list_leagues: bool,

    /// List current configuration settings, then exit.
    #[arg(long = "list-config", help_heading = "Configuration")]
    pub list_config: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Also write logs to this file.
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug")]
    pub log_file: Option<String>,
}
