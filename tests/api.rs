//! Endpoint tests driving the full router with `tower::ServiceExt::oneshot`.

use std::io::Write;
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use restaurant_search_api::api::AppState;
use restaurant_search_api::app;
use restaurant_search_api::storage::schema::COLUMN_COUNT;
use restaurant_search_api::storage::Store;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn seeded_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = Store::new(dir.path().join("restaurants.db"));
    store.ensure_table().unwrap();
    store
        .replace_all(&[
            venue("鳥貴族", "渋谷", "居酒屋", "20", "3000", "5000"),
            venue("牛角", "新宿", "焼肉", "4", "2000", "8000"),
        ])
        .unwrap();

    let state = AppState {
        store,
        csv_path: dir.path().join("export.csv"),
    };
    (dir, app(state))
}

fn venue(
    name: &str,
    area: &str,
    category: &str,
    capacity: &str,
    budget_min: &str,
    budget_max: &str,
) -> Vec<String> {
    let mut row = vec![String::new(); COLUMN_COUNT];
    row[0] = name.to_string();
    row[11] = r#"["唐揚げ","焼き鳥"]"#.to_string();
    row[12] = "ビール,ハイボール".to_string();
    row[17] = area.to_string();
    row[20] = capacity.to_string();
    row[21] = category.to_string();
    row[22] = budget_min.to_string();
    row[23] = budget_max.to_string();
    row
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn hello_greets() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Hello World"));
}

#[tokio::test]
async fn restaurants_listing_wraps_records() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/restaurants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn post_restaurants_filters_by_body_fields() {
    let (_dir, app) = seeded_app();

    let (status, body) =
        post_json(&app, "/api/restaurants", json!({"area": "新宿", "people": ""})).await;
    assert_eq!(status, StatusCode::OK);
    let restaurants = body["restaurants"].as_array().unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["name"], "牛角");
}

#[tokio::test]
async fn search_applies_budget_band_scenario() {
    let (_dir, app) = seeded_app();

    // area=渋谷 (percent-encoded) with the caller's budget bounds.
    let (status, body) = get(
        &app,
        "/api/search?area=%E6%B8%8B%E8%B0%B7&budgetMin=3000&budgetMax=5000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let restaurants = body["restaurants"].as_array().unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["area"], "渋谷");
}

#[tokio::test]
async fn search_ignores_empty_and_out_of_vocabulary_values() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/search?guests=&budgetMin=&privateRoom=maybe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_result_set_is_a_list_not_an_error() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/search?guests=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn restaurant_lookup_returns_the_record() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/restaurant/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "鳥貴族");
}

#[tokio::test]
async fn missing_restaurant_is_a_404_with_error_body() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/restaurant/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Restaurant not found");
}

#[tokio::test]
async fn menu_subresource_parses_both_encodings() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/restaurant/1/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["foodMenu"], json!(["唐揚げ", "焼き鳥"]));
    assert_eq!(body["drinkMenu"], json!(["ビール", "ハイボール"]));
}

#[tokio::test]
async fn missing_menu_is_a_404() {
    let (_dir, app) = seeded_app();

    let (status, _body) = get(&app, "/restaurant/999/menu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn areas_and_genres_list_distinct_values() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/areas").await;
    assert_eq!(status, StatusCode::OK);
    let mut areas: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    areas.sort();
    assert_eq!(areas, vec!["新宿", "渋谷"]);

    let (status, body) = get(&app, "/api/genres").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn check_db_returns_at_most_five_rows() {
    let (_dir, app) = seeded_app();

    let (status, body) = get(&app, "/api/check-db").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn import_endpoint_replaces_table_from_export() {
    let (dir, app) = seeded_app();

    let csv_path: PathBuf = dir.path().join("export.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "name,address,phone").unwrap();
    writeln!(file, "磯丸水産,渋谷1-2-3,03-0000-0000").unwrap();
    file.flush().unwrap();

    let (status, body) = post_json(&app, "/api/import", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["imported"], 1);

    let (_status, body) = get(&app, "/api/restaurants").await;
    let restaurants = body["restaurants"].as_array().unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0]["name"], "磯丸水産");
}

#[tokio::test]
async fn import_of_header_only_export_is_a_no_op() {
    let (dir, app) = seeded_app();

    let csv_path: PathBuf = dir.path().join("export.csv");
    std::fs::write(&csv_path, "name,address,phone\n").unwrap();

    let (status, body) = post_json(&app, "/api/import", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "no data");
    assert_eq!(body["imported"], 0);

    // Previous contents survive.
    let (_status, body) = get(&app, "/api/restaurants").await;
    assert_eq!(body["restaurants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn import_with_missing_export_is_an_upstream_error() {
    let (_dir, app) = seeded_app();

    let (status, body) = post_json(&app, "/api/import", json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("export"));
}
