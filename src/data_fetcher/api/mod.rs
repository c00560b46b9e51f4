pub mod bracket;
mod fetch_utils;
pub mod home;
pub mod http_client;
pub mod lookahead;
pub mod openligadb;
pub mod orchestrator;
pub mod source;
pub mod urls;

pub use bracket::{BracketOutcome, build_bracket, playoff_round};
pub use home::{HomeData, load_home_data};
pub use http_client::create_http_client_with_timeout;
pub use lookahead::{LookaheadOutcome, next_round_candidates, probe_next_round};
pub use openligadb::OpenLigaClient;
pub use orchestrator::{fetch_groups_with_fallback, reconcile, reconcile_with_shortcuts};
pub use source::ResultsSource;
pub use urls::*;
