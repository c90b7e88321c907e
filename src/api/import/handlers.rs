use axum::{Json, extract::State};
use tracing::info;

use crate::api::models::*;
use crate::importer;

/// Reloads the table from the spreadsheet export, `POST /api/import`.
///
/// An empty export is a no-op reported as "no data"; the existing table is
/// left untouched.
pub async fn import_handler(State(state): State<AppState>) -> Result<Json<ImportResponse>, AppError> {
    info!(path = %state.csv_path.display(), "Importing spreadsheet export");

    let rows = importer::load_rows(&state.csv_path)
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

    if rows.is_empty() {
        info!("Export has no data rows, leaving table untouched");
        return Ok(Json(ImportResponse {
            status: "no data".to_string(),
            imported: 0,
        }));
    }

    let imported = state.store.replace_all(&rows)?;

    info!(imported, "Import complete");

    Ok(Json(ImportResponse {
        status: "success".to_string(),
        imported,
    }))
}
