pub mod branches;
pub mod docs;
pub mod download;
pub mod preferences;
pub mod static_files;

pub use branches::*;
pub use docs::*;
pub use download::*;
pub use preferences::*;
pub use static_files::*;

use std::sync::Arc;

use crate::error::AppError;
use crate::excel::cached_cutoffs;
use crate::models::CutoffTable;
use crate::server::AppState;

/// Loads (or reuses) the configured cutoff table off the async runtime.
pub(crate) async fn load_table(state: &AppState) -> Result<Arc<CutoffTable>, AppError> {
    let path = state.config.data_file.clone();
    let joined = tokio::task::spawn_blocking(move || {
        cached_cutoffs(&path).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| AppError::Internal(format!("task join error: {}", e)))?;

    joined.map_err(|e| {
        tracing::error!(error = %e, "failed to load cutoff data");
        AppError::DataUnavailable(e)
    })
}
