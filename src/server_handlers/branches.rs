use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::api_json::options_json;
use crate::error::AppError;
use crate::excel::unique_branches;
use crate::server::AppState;

use super::load_table;

/// GET /get_branches
pub async fn get_branches_handler(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let table = load_table(&state).await?;
    let branches = unique_branches(&table);
    tracing::debug!(count = branches.len(), "branches listed");
    Ok(HttpResponse::Ok().json(json!({ "branches": branches })))
}

/// GET /options
/// Dropdown choices for the page, branches included.
pub async fn options_handler(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let table = load_table(&state).await?;
    Ok(HttpResponse::Ok().json(options_json(&unique_branches(&table))))
}
