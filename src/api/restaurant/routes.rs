use axum::{Router, routing::get};

use crate::api::models::AppState;
use crate::api::restaurant::handlers::{get_menu_handler, get_restaurant_handler};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurant/{id}", get(get_restaurant_handler))
        .route("/restaurant/{id}/menu", get(get_menu_handler))
}
