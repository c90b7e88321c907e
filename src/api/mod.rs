pub mod import;
pub mod meta;
pub mod models;
pub mod restaurant;
pub mod search;

// Re-exports
pub use models::*;

// Greeting handlers (simple, keep here)
use axum::Json;

pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Restaurant search API start!".to_string(),
    })
}

pub async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello World by {}", env!("CARGO_PKG_NAME")),
    })
}
