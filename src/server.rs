use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error::AppError;
use crate::server_handlers::*;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Caps concurrent preference computations and exports.
    pub permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> AppState {
        let permits = Arc::new(Semaphore::new(std::cmp::max(1, config.workers)));
        AppState {
            config: Arc::new(config),
            permits,
        }
    }
}

/// Registers every route. Used by `run_server` and by the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and wrong content types get the same `{"error"}` body
    // as every other failure.
    let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("invalid request body: {}", err)).into()
    });

    cfg.app_data(json_cfg)
        .route("/", web::get().to(index_handler))
        .route("/static/{path:.*}", web::get().to(static_file_handler))
        .route("/plots/{path:.*}", web::get().to(plot_file_handler))
        .route("/get_branches", web::get().to(get_branches_handler))
        .route("/options", web::get().to(options_handler))
        .route("/generate_preferences", web::post().to(generate_preferences_handler))
        .route("/predict", web::post().to(generate_preferences_handler))
        .route("/download_excel", web::get().to(download_excel_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let state = AppState::new(config);
    tracing::info!(
        bind = %bind,
        data_file = %state.config.data_file.display(),
        workers = state.config.workers,
        "starting server"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
