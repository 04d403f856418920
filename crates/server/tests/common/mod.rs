//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock generation client injected, enabling E2E testing without
//! calling the hosted model.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tower::ServiceExt;

use airsight_core::{testing::MockGenerationClient, AqiFetcher, Config, GenerationClient};
use airsight_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use airsight_core::testing::fixtures;

/// Test fixture for E2E testing with a mock generation client.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.client.set_text(fixtures::search_response_text()).await;
///
///     let response = fixture.get("/api/v1/locations/search?q=paris").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock generation client - configure model answers
    pub client: Arc<MockGenerationClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Raw body text, for non-JSON endpoints
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let client = Arc::new(MockGenerationClient::new());
        let dyn_client: Arc<dyn GenerationClient> = client.clone();

        // Seeded RNG so placeholder AQI values are reproducible
        let aqi_fetcher = AqiFetcher::with_config(Arc::clone(&dyn_client), config.aqi.clone())
            .with_rng(StdRng::seed_from_u64(42));
        let state = Arc::new(AppState::new(config, dyn_client).with_aqi_fetcher(aqi_fetcher));

        Self {
            router: create_router(state),
            client,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
