use axum::{Router, routing::get};

use crate::api::meta::handlers::{areas_handler, check_db_handler, genres_handler};
use crate::api::models::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/areas", get(areas_handler))
        .route("/api/genres", get(genres_handler))
        .route("/api/check-db", get(check_db_handler))
}
