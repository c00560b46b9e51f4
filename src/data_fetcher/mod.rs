pub mod api;
pub mod models;
pub mod processors;

pub use api::{HomeData, OpenLigaClient, ResultsSource, load_home_data, reconcile};
pub use models::{Match, Reconciliation};
