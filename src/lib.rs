//! Restaurant directory backend: imports venue rows from a spreadsheet export
//! into SQLite and serves filtered-search endpoints over the table.

pub mod api;
pub mod config;
pub mod importer;
pub mod storage;

use axum::{Router, routing::get};

use crate::api::AppState;

/// Builds the full route set. Layers (trace, CORS) are applied by the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root_handler))
        .route("/api/hello", get(api::hello_handler))
        .merge(api::search::routes())
        .merge(api::restaurant::routes())
        .merge(api::meta::routes())
        .merge(api::import::routes())
        .with_state(state)
}
