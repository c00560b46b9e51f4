// src/main.rs
mod cli;
mod commands;
mod logging;

use chrono::Local;
use clap::Parser;
use cli::Args;
use matchday::config::Config;
use matchday::data_fetcher::api::OpenLigaClient;
use matchday::error::AppError;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::get_config_path);
    let config = Config::load_with_overrides(&config_path).await?;

    if args.list_config {
        commands::handle_list_config_command(&config, &config_path);
        return Ok(());
    }

    let log_file = args.log_file.as_deref().or(config.log_file_path.as_deref());
    let _guard = logging::setup_logging(args.debug, log_file)?;
    debug!("Using API domain {}", config.api_domain);

    let source = OpenLigaClient::from_config(&config)?;

    let result = if args.list_leagues {
        commands::handle_list_leagues_command(&source, args.json).await
    } else {
        commands::handle_home_command(&source, &args, Local::now().date_naive()).await
    };

    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
