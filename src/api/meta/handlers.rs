use axum::{Json, extract::State};
use tracing::info;

use crate::api::models::*;
use crate::storage::Record;

/// Distinct area strings, `GET /api/areas`.
pub async fn areas_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let areas = state.store.distinct_areas()?;

    info!(found = areas.len(), "Listed areas");

    Ok(Json(areas))
}

/// Distinct category strings, `GET /api/genres`.
pub async fn genres_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let genres = state.store.distinct_categories()?;

    info!(found = genres.len(), "Listed genres");

    Ok(Json(genres))
}

/// First five raw rows, `GET /api/check-db` diagnostic.
pub async fn check_db_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.store.sample(5)?))
}
