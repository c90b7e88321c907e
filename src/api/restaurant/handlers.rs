use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::api::models::*;
use crate::storage::Record;

/// Single-record lookup, `GET /restaurant/{id}`.
///
/// A missing id is a 404, never an empty list: callers distinguish "no such
/// restaurant" from "the list endpoint matched nothing".
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Record>, AppError> {
    info!(id, "Fetching restaurant");

    let record = state
        .store
        .get(id)?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?;

    Ok(Json(record))
}

/// Menu sub-resource, `GET /restaurant/{id}/menu`.
pub async fn get_menu_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MenuResponse>, AppError> {
    info!(id, "Fetching menu");

    let menu = state
        .store
        .menu(id)?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?;

    Ok(Json(MenuResponse {
        food_menu: menu.food_items,
        drink_menu: menu.drink_items,
    }))
}
