//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the full router with a
//! scripted LLM client injected, so endpoint behavior can be tested without
//! a real completion service.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use lixi_core::config::load_config_from_str;
use lixi_core::testing::MockLlmClient;
use lixi_core::LlmClient;

/// Re-export fixtures for test convenience
pub use lixi_core::testing::fixtures;

/// Test fixture with a scripted LLM client.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_wish() {
///     let fixture = TestFixture::new();
///     fixture.llm.push_text("Chúc mừng năm mới");
///
///     let response = fixture.post("/api/wish", json!({"lixi_type": "50k"})).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock LLM client - script completions and inspect calls
    pub llm: Arc<MockLlmClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let llm = Arc::new(MockLlmClient::new());

        let mut config = load_config_from_str(
            r#"
[llm]
endpoint = "https://example.openai.azure.com"
api_key = "test-key"
"#,
        )
        .expect("Failed to build test config");
        config.rate_limit.requests_per_minute = test_config.requests_per_minute;

        let state = Arc::new(lixi_server::state::AppState::new(
            config,
            Arc::clone(&llm) as Arc<dyn LlmClient>,
        ));

        let router = lixi_server::api::create_router(state);

        Self { router, llm }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_from(path, body, SocketAddr::from(([127, 0, 0, 1], 50000)))
            .await
    }

    /// Send a POST request with JSON body from a specific peer address.
    pub async fn post_from(&self, path: &str, body: Value, peer: SocketAddr) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .extension(ConnectInfo(peer))
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.post_with_content_type(path, body, "application/json")
            .await
    }

    /// Send a POST request with custom content type (for testing wrong content types).
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send an arbitrary request to the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Per-client requests per minute (0 disables limiting)
    pub requests_per_minute: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 30,
        }
    }
}

impl TestConfig {
    /// Create config with a specific rate limit.
    pub fn with_rate_limit(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
        }
    }
}

/// Helper to assert response status with a helpful message.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
