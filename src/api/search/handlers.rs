use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

use crate::api::models::*;
use crate::storage::SearchFilters;

/// Unfiltered listing, `GET /api/restaurants`.
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<RestaurantsResponse>, AppError> {
    let restaurants = state.store.search(&SearchFilters::default())?;

    info!(found = restaurants.len(), "Listed restaurants");

    Ok(Json(RestaurantsResponse { restaurants }))
}

/// Filtered listing, `POST /api/restaurants` with `{area, genre, people}`.
pub async fn filter_restaurants_handler(
    State(state): State<AppState>,
    Json(request): Json<RestaurantsRequest>,
) -> Result<Json<RestaurantsResponse>, AppError> {
    let filters = request.into_filters();

    info!(
        area = ?filters.area,
        genre = ?filters.genre,
        people = ?filters.capacity,
        "Filtering restaurants"
    );

    let restaurants = state.store.search(&filters)?;

    info!(found = restaurants.len(), "Filter complete");

    Ok(Json(RestaurantsResponse { restaurants }))
}

/// Full search, `GET /api/search` with query-string filters.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RestaurantsResponse>, AppError> {
    let filters = params.into_filters();

    info!(
        area = ?filters.area,
        genre = ?filters.genre,
        guests = ?filters.capacity,
        budget_min = ?filters.budget_min,
        budget_max = ?filters.budget_max,
        "Searching restaurants"
    );

    let restaurants = state.store.search(&filters)?;

    info!(found = restaurants.len(), "Search complete");

    Ok(Json(RestaurantsResponse { restaurants }))
}
