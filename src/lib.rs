//! Football matchday viewer library
//!
//! This library reconciles the current round, the next round, standings and
//! knockout brackets of football competitions from the OpenLigaDB results API.
//! Individual endpoints may fail independently; failures are reported as data
//! categories on the result instead of aborting the whole view.
//!
//! # Examples
//!
//! ```rust,no_run
//! use matchday::data_fetcher::api::{OpenLigaClient, load_home_data};
//! use matchday::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = OpenLigaClient::from_config(&config)?;
//!
//!     let today = chrono::Local::now().date_naive();
//!     let home = load_home_data(&client, Some("bl1"), None, today).await?;
//!
//!     println!("{}: {}", home.label, home.reconciliation.current_round.name);
//!     for category in &home.reconciliation.visible_errors {
//!         println!("Could not load {category}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod leagues;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{
    HomeData, OpenLigaClient, ResultsSource, load_home_data, reconcile, reconcile_with_shortcuts,
};
pub use data_fetcher::models::{DataCategory, Reconciliation};
pub use data_fetcher::processors::{KnockoutTie, group_knockout_matches_by_tie};
pub use error::AppError;
pub use leagues::LeagueKey;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
