use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::error;

use crate::storage::{Record, SearchFilters, Store};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub csv_path: PathBuf,
}

/// Body of `POST /api/restaurants`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantsRequest {
    pub area: Option<String>,
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub people: Option<i64>,
}

impl RestaurantsRequest {
    pub fn into_filters(self) -> SearchFilters {
        SearchFilters {
            area: self.area,
            genre: self.genre,
            capacity: self.people,
            ..SearchFilters::default()
        }
    }
}

/// Query parameters of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub area: Option<String>,
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub guests: Option<i64>,
    #[serde(rename = "budgetMin", deserialize_with = "lenient_i64")]
    pub budget_min: Option<i64>,
    #[serde(rename = "budgetMax", deserialize_with = "lenient_i64")]
    pub budget_max: Option<i64>,
    #[serde(rename = "privateRoom")]
    pub private_room: Option<String>,
    #[serde(rename = "drinkIncluded")]
    pub drink_included: Option<String>,
}

impl SearchParams {
    pub fn into_filters(self) -> SearchFilters {
        SearchFilters {
            area: self.area,
            genre: self.genre,
            capacity: self.guests,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            private_room: self.private_room,
            drink_all_included: self.drink_included,
        }
    }
}

/// Accepts a number, a numeric string, or an empty string (treated as absent).
/// Query-string extraction hands every value over as a string, JSON bodies as
/// numbers; both forms land here.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}")))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    #[serde(rename = "foodMenu")]
    pub food_menu: Vec<String>,
    #[serde(rename = "drinkMenu")]
    pub drink_menu: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: String,
    pub imported: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type. Every handler failure becomes a JSON error body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Storage(#[from] rusqlite::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{}: {}", status, self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
