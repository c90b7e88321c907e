use axum::{Router, routing::post};

use crate::api::import::handlers::import_handler;
use crate::api::models::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/import", post(import_handler))
}
