// --- JOSAA college preference generator - entry point ---

use josaa_predictor::{logging, run_server, Config};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init_tracing();
    let config = Config::from_env();
    tracing::info!("=== JOSAA College Preference List Generator (API) ===");
    tracing::info!("listening on http://{}", config.bind);
    run_server(config).await
}
