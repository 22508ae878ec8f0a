use std::path::Path;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::server::AppState;

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(std::ffi::OsStr::to_str) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("json") => "application/json",
        Some("ico") => "image/x-icon",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// GET /
/// Serves the page, or a welcome message when no page is installed.
pub async fn index_handler(state: web::Data<AppState>) -> impl Responder {
    let path = state.config.index_file.clone();
    match tokio::fs::read(&path).await {
        Ok(bytes) => HttpResponse::Ok().content_type(mime_for(&path)).body(bytes),
        Err(_) => HttpResponse::Ok().json(json!({"message": "Welcome to JOSAA Predictor API"})),
    }
}

/// GET /static/{path}
pub async fn static_file_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    serve_file(&state.config.static_dir, &path.into_inner()).await
}

/// GET /plots/{path}
/// Rendered charts, for plot directories outside the static directory.
pub async fn plot_file_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    serve_file(&state.config.plot_dir, &path.into_inner()).await
}

async fn serve_file(root: &Path, rel: &str) -> HttpResponse {
    if rel.trim().is_empty() || rel.contains("..") || rel.starts_with('/') || rel.contains('\\') {
        return HttpResponse::BadRequest().json(json!({"error": "invalid path"}));
    }

    let full = root.join(rel);
    if !full.is_file() {
        return HttpResponse::NotFound().json(json!({"error": "file not found"}));
    }

    match tokio::fs::read(&full).await {
        Ok(bytes) => HttpResponse::Ok().content_type(mime_for(&full)).body(bytes),
        Err(e) => {
            tracing::warn!(path = %full.display(), error = %e, "static file unreadable");
            HttpResponse::InternalServerError().json(json!({"error": format!("failed to read file: {}", e)}))
        }
    }
}
