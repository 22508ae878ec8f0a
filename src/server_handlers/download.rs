use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::algorithm::{generate_preferences, validated_rank};
use crate::api_json::query_from_params;
use crate::error::AppError;
use crate::excel::{export_filename, preferences_workbook, table_workbook, XLSX_MIME};
use crate::server::AppState;

use super::load_table;

/// GET /download_excel
///
/// Without parameters the whole cutoff table is exported. With the
/// `/generate_preferences` fields as query parameters the generated list is
/// exported instead.
pub async fn download_excel_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let pref_query = query_from_params(&query.into_inner())?;
    if let Some(q) = pref_query.as_ref() {
        validated_rank(q)?;
    }

    let table = load_table(&state).await?;
    let permit = state
        .permits
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| AppError::Internal("failed to acquire worker permit".into()))?;

    let bytes = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        match pref_query {
            Some(q) => {
                let prefs = generate_preferences(&table, &q)?;
                preferences_workbook(&prefs).map_err(|e| AppError::Export(e.to_string()))
            }
            None => table_workbook(&table).map_err(|e| AppError::Export(e.to_string())),
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("task join error: {}", e)))?
    .inspect_err(|e| {
        if let AppError::Export(detail) = e {
            tracing::error!(error = %detail, "excel export failed");
        }
    })?;

    let filename = export_filename(&chrono::Local::now());
    tracing::info!(file = %filename, bytes = bytes.len(), "excel export served");

    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .append_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}
