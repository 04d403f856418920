//! In-process E2E tests for the HTTP API with a mock generation client.

mod common;

use std::time::Duration;

use airsight_core::{genai::GenerationError, Config, PROVIDER_ROSTER};
use axum::http::StatusCode;
use common::{fixtures, TestFixture};

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let mut config = Config::default();
    config.generation.api_key = Some("top-secret".to_string());
    let fixture = TestFixture::with_config(config);

    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["generation"]["api_key_configured"], true);
    assert_eq!(response.body["generation"]["model"], "gemini-2.5-flash");
    assert!(!response.text.contains("top-secret"));
}

#[tokio::test]
async fn test_location_search_returns_complete_candidates() {
    let fixture = TestFixture::new();
    fixture.client.set_text(fixtures::search_response_text()).await;

    let response = fixture.get("/api/v1/locations/search?q=paris").await;

    assert_status!(response, StatusCode::OK);
    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Eiffel Tower");
    assert_eq!(results[0]["lat"], 48.8584);
    assert_eq!(results[0]["aqi"], 42);
    assert_eq!(results[0]["status"], "Good");
    assert_eq!(results[1]["title"], "Louvre Museum");
    assert!(results[1].get("aqi").is_none());

    let recorded = fixture.client.recorded_requests().await;
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].request.prompt.contains("\"paris\""));
}

#[tokio::test]
async fn test_location_search_failure_is_empty_200() {
    let fixture = TestFixture::new();
    fixture
        .client
        .set_next_error(GenerationError::Timeout(Duration::from_secs(30)))
        .await;

    let response = fixture.get("/api/v1/locations/search?q=nowhere").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["results"], serde_json::json!([]));
}

#[tokio::test]
async fn test_location_search_without_query() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/locations/search").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["results"], serde_json::json!([]));
    assert_eq!(fixture.client.call_count().await, 0);
}

#[tokio::test]
async fn test_aqi_comparison() {
    let fixture = TestFixture::new();
    fixture.client.set_response(fixtures::aqi_response()).await;

    let response = fixture.get("/api/v1/aqi?lat=35.66&lng=139.7").await;

    assert_status!(response, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["location_name"], "Shibuya, Tokyo, Japan");
    assert_eq!(body["avg_aqi"], 50);

    let providers = body["providers"].as_array().unwrap();
    let names: Vec<_> = providers
        .iter()
        .map(|p| p["provider_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, PROVIDER_ROSTER.to_vec());
    assert_eq!(providers[3]["pollutants"]["pm25"], 17.8);

    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(body["sources"].as_array().unwrap().len(), 2);
    assert_eq!(body["categories"]["average"]["category"], "good");
    assert_eq!(body["categories"]["providers"][1]["category"], "moderate");
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));

    let recorded = fixture.client.recorded_requests().await;
    let lat_lng = recorded[0].request.lat_lng.unwrap();
    assert_eq!(lat_lng.latitude, 35.66);
    assert_eq!(lat_lng.longitude, 139.7);
}

#[tokio::test]
async fn test_aqi_with_empty_answer_uses_fallbacks() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/aqi?lat=0&lng=0").await;

    assert_status!(response, StatusCode::OK);
    let providers = response.body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 5);
    for provider in providers {
        let aqi = provider["aqi_value"].as_f64().unwrap();
        assert!((10.0..50.0).contains(&aqi));
        assert_eq!(provider["pollutants"]["co"], 0.5);
        assert_eq!(provider["confidence"], "High");
    }
    assert_eq!(response.body["location_name"], "Search Location");
    assert_eq!(
        response.body["recommendations"],
        serde_json::json!([
            "Sensitive groups should reduce outdoor exercise.",
            "Keep windows closed if possible."
        ])
    );
}

#[tokio::test]
async fn test_aqi_generation_failure_is_bad_gateway() {
    let fixture = TestFixture::new();
    fixture
        .client
        .set_next_error(GenerationError::Api {
            status: 500,
            message: "internal".to_string(),
        })
        .await;

    let response = fixture.get("/api/v1/aqi?lat=48.85&lng=2.35").await;

    assert_status!(response, StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.body["error"],
        "Failed to fetch air quality data. Please try another location."
    );
}

#[tokio::test]
async fn test_aqi_out_of_range_coordinates() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/aqi?lat=95&lng=0").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("latitude"));
    assert_eq!(fixture.client.call_count().await, 0);
}

#[tokio::test]
async fn test_aqi_missing_coordinates() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/aqi?lat=12").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("airsight_http_requests_total"));
}
