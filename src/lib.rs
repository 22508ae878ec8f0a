// Library root of `josaa_predictor`: cutoff loading, the admission
// probability model, preference generation and the HTTP server.
pub mod algorithm;
pub mod api_json;
pub mod chart;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod models;
pub mod server;
mod server_handlers;

pub use config::Config;
pub use server::{configure, run_server, AppState};
