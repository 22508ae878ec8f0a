use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::algorithm::{generate_preferences, validated_rank};
use crate::chart::{histogram, plot_url, render_histogram_svg, write_plot, DEFAULT_BINS};
use crate::error::AppError;
use crate::models::PreferenceQuery;
use crate::server::AppState;

use super::load_table;

/// POST /generate_preferences (also POST /predict)
///
/// Body: `PreferenceQuery`. Response:
/// `{"preferences": [...], "plot": "static/plot_<ts>_<seq>.svg" | null, "plot_data": [bins]}`.
pub async fn generate_preferences_handler(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let query: PreferenceQuery = serde_json::from_value(body.into_inner())
        .map_err(|e| AppError::InvalidRequest(format!("invalid request body: {}", e)))?;
    validated_rank(&query)?;
    let start = std::time::Instant::now();

    let table = load_table(&state).await?;

    let permit = state
        .permits
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| AppError::Internal("failed to acquire worker permit".into()))?;

    let config = state.config.clone();
    let q = query.clone();
    let (preferences, plot, bins) = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let preferences = generate_preferences(&table, &q)?;

        let probabilities: Vec<f64> = preferences.iter().map(|p| p.probability).collect();
        let bins = histogram(&probabilities, DEFAULT_BINS);
        let plot = match render_histogram_svg(&bins)
            .and_then(|svg| write_plot(&config.plot_dir, &svg, &chrono::Local::now()))
        {
            Ok(name) => Some(plot_url(&config.static_dir, &config.plot_dir, &name)),
            Err(e) => {
                tracing::warn!(error = %e, "probability chart not rendered");
                None
            }
        };
        Ok::<_, AppError>((preferences, plot, bins))
    })
    .await
    .map_err(|e| AppError::Internal(format!("task join error: {}", e)))?
    .inspect_err(|e| {
        tracing::info!(rank = ?query.jee_rank, error = %e, "preference request rejected");
    })?;

    tracing::info!(
        rank = ?query.jee_rank,
        category = %query.category,
        college_type = %query.college_type,
        branch = %query.preferred_branch,
        round = %query.round_no,
        results = preferences.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "preferences generated"
    );

    Ok(HttpResponse::Ok().json(json!({
        "preferences": preferences,
        "plot": plot,
        "plot_data": bins,
    })))
}
