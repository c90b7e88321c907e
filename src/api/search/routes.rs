use axum::{Router, routing::get};

use crate::api::models::AppState;
use crate::api::search::handlers::{
    filter_restaurants_handler, list_restaurants_handler, search_handler,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/restaurants",
            get(list_restaurants_handler).post(filter_restaurants_handler),
        )
        .route("/api/search", get(search_handler))
}
