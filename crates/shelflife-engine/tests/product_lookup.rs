//! The network-backed strategy against a mocked product search API.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use shelflife_core::{EngineConfig, Environment};
use shelflife_engine::strategies::{METHOD_KEYWORD, METHOD_PRINTED_DATE, METHOD_PRODUCT_DATABASE};
use shelflife_engine::{ExpiryEngine, FixedClock};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(base_url: &str) -> ExpiryEngine {
    let config = EngineConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        tables_path: None,
        product_lookup_enabled: true,
        off_base_url: base_url.to_string(),
        off_user_agent: "shelflife-test/0.1".to_string(),
        lookup_timeout_secs: 1,
        search_page_size: 3,
        review_threshold: 0.5,
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    ExpiryEngine::with_clock(&config, Arc::new(FixedClock(today)))
        .expect("engine builds from test config")
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("search_terms", "whole milk"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn printed_date_from_database_wins() {
    let server = MockServer::start().await;
    let body = json!({
        "products": [
            { "product_name": "Whole Milk", "categories_tags": ["en:meats"] },
            {
                "product_name": "Whole Milk",
                "categories_tags": ["en:dairies"],
                "best_before_date": "2024-01-20"
            }
        ]
    });
    mount(&server, ResponseTemplate::new(200).set_body_json(&body)).await;

    let estimate = engine(&server.uri()).resolve("Whole Milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_PRINTED_DATE);
    assert_eq!(estimate.expiry_date_iso(), "2024-01-20");
    assert_eq!(estimate.shelf_life_days(), 19);
    assert_eq!(estimate.category(), "dairy");
    assert!((estimate.confidence() - 0.95).abs() < f64::EPSILON);
}

#[tokio::test]
async fn category_tag_from_database() {
    let server = MockServer::start().await;
    let body = json!({
        "products": [
            { "product_name": "Whole Milk", "categories_tags": ["en:snacks"] },
            { "product_name": "Whole Milk", "categories_tags": ["en:dairies"] }
        ]
    });
    mount(&server, ResponseTemplate::new(200).set_body_json(&body)).await;

    let estimate = engine(&server.uri()).resolve("whole milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_PRODUCT_DATABASE);
    assert_eq!(estimate.category(), "dairy");
    assert_eq!(estimate.shelf_life_days(), 7);
    assert!((estimate.confidence() - 0.8).abs() < f64::EPSILON);
}

#[tokio::test]
async fn no_candidates_falls_through_to_keywords() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "products": [] })),
    )
    .await;

    let estimate = engine(&server.uri()).resolve("whole milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_KEYWORD);
}

#[tokio::test]
async fn server_error_falls_through_to_keywords() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let estimate = engine(&server.uri()).resolve("whole milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_KEYWORD);
    assert_eq!(estimate.category(), "dairy");
}

#[tokio::test]
async fn malformed_body_falls_through_to_keywords() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let estimate = engine(&server.uri()).resolve("whole milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_KEYWORD);
}

#[tokio::test]
async fn slow_database_is_abandoned() {
    let server = MockServer::start().await;
    let body = json!({
        "products": [{ "best_before_date": "2024-01-20", "categories_tags": [] }]
    });
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(&body)
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let started = std::time::Instant::now();
    let estimate = engine(&server.uri()).resolve("whole milk").await.unwrap();
    assert_eq!(estimate.method(), METHOD_KEYWORD);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn receipt_prediction_uses_database_shelf_life() {
    let server = MockServer::start().await;
    let body = json!({
        "products": [{ "categories_tags": ["en:dairies"], "use_by_date": "2024-01-11" }]
    });
    mount(&server, ResponseTemplate::new(200).set_body_json(&body)).await;

    // Ten days from the clock's today, re-anchored to the purchase date.
    let prediction = engine(&server.uri())
        .predict("whole milk", "2023-12-20", Some("dairy"))
        .await;
    assert_eq!(prediction.method, METHOD_PRINTED_DATE);
    assert_eq!(prediction.expiry_date_iso(), "2023-12-30");
    assert!((prediction.confidence - 0.95).abs() < 1e-9);
}
