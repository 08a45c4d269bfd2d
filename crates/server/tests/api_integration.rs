//! In-process API tests with a scripted LLM client.

mod common;

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use lixi_core::fallback::{fallback_fortune_data, fallback_wishes};
use lixi_core::{LixiTier, LlmError};

use common::{fixtures, TestConfig, TestFixture};

// =============================================================================
// Health & Metrics
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/health").await;

    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "status", json!("ok"));
    assert_json_path!(response.body, "service", json!("lixi"));
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.llm.push_text("Chúc mừng năm mới");
    fixture
        .post("/api/wish", json!({"lixi_type": "50k"}))
        .await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.text.contains("lixi_http_requests_total"));
    assert!(response.text.contains("lixi_generations_total"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/nope").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

// =============================================================================
// Wish
// =============================================================================

#[tokio::test]
async fn test_wish_success() {
    let fixture = TestFixture::new();
    fixture.llm.push_text("\"Chúc Lan năm mới phát tài 🧧\"");

    let response = fixture
        .post(
            "/api/wish",
            json!({"lixi_type": "500k", "user_name": "Lan"}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "wish_text", json!("Chúc Lan năm mới phát tài 🧧"));
    assert_json_path!(response.body, "lixi_type", json!("500k"));

    let request = fixture.llm.last_request().unwrap();
    assert!(request.prompt.contains("Lan"));
}

#[tokio::test]
async fn test_wish_llm_failure_returns_fallback() {
    let fixture = TestFixture::new();
    fixture.llm.push_error(LlmError::Upstream {
        status: Some(500),
        message: "boom".to_string(),
    });

    let response = fixture
        .post("/api/wish", json!({"lixi_type": "special"}))
        .await;

    assert_status!(response, StatusCode::OK);
    let text = response.body["wish_text"].as_str().unwrap();
    assert!(fallback_wishes(LixiTier::Special).contains(&text));
    assert_json_path!(response.body, "lixi_type", json!("special"));
}

#[tokio::test]
async fn test_wish_invalid_tier_rejected() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/api/wish", json!({"lixi_type": "1000k"}))
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fixture.llm.call_count(), 0);
}

#[tokio::test]
async fn test_wish_missing_tier_rejected() {
    let fixture = TestFixture::new();
    let response = fixture.post("/api/wish", json!({"user_name": "Lan"})).await;
    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_wish_malformed_json_rejected() {
    let fixture = TestFixture::new();
    let response = fixture.post_raw("/api/wish", "{\"lixi_type\": ").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wish_wrong_content_type_rejected() {
    let fixture = TestFixture::new();
    let response = fixture
        .post_with_content_type("/api/wish", "lixi_type=50k", "text/plain")
        .await;
    assert_status!(response, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// =============================================================================
// Fortune
// =============================================================================

#[tokio::test]
async fn test_fortune_success() {
    let fixture = TestFixture::new();
    fixture.llm.push_text(&fixtures::fenced_fortune_json(5));

    let response = fixture
        .post(
            "/api/fortune",
            json!({"mode": "tinh_duyen", "user_name": "Minh"}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "mode", json!("tinh_duyen"));
    assert_json_path!(response.body["fortune"], "title", json!("Phúc Lộc Song Toàn"));
    assert_json_path!(response.body["fortune"], "rating", json!(5));
    assert!(response.body["drawn_at"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_fortune_invalid_content_returns_fallback() {
    let fixture = TestFixture::new();
    fixture.llm.push_text(&fixtures::fortune_json(9));

    let response = fixture
        .post("/api/fortune", json!({"mode": "cong_danh"}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "mode", json!("cong_danh"));
    assert_eq!(
        response.body["fortune"],
        serde_json::to_value(fallback_fortune_data()).unwrap()
    );
}

#[tokio::test]
async fn test_fortune_timeout_returns_fallback() {
    let fixture = TestFixture::new();
    fixture.llm.push_error(LlmError::Timeout("deadline".to_string()));

    let response = fixture
        .post("/api/fortune", json!({"mode": "random"}))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body["fortune"], "title", json!("Vạn Sự Như Ý"));
}

#[tokio::test]
async fn test_fortune_invalid_mode_rejected() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/api/fortune", json!({"mode": "lucky"}))
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fixture.llm.call_count(), 0);
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let fixture = TestFixture::with_config(TestConfig::with_rate_limit(2));

    for _ in 0..2 {
        let response = fixture
            .post("/api/wish", json!({"lixi_type": "50k"}))
            .await;
        assert_status!(response, StatusCode::OK);
    }

    let response = fixture
        .post("/api/fortune", json!({"mode": "random"}))
        .await;

    assert_status!(response, StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers.contains_key(header::RETRY_AFTER));
    assert!(response.body["error"].is_string());
    assert!(response.body["retry_after_ms"].as_u64().unwrap() > 0);
    // Rejected request never reached the model
    assert_eq!(fixture.llm.call_count(), 2);
}

#[tokio::test]
async fn test_rate_limit_is_per_client() {
    let fixture = TestFixture::with_config(TestConfig::with_rate_limit(1));
    let alice = SocketAddr::from(([192, 168, 1, 10], 1234));
    let bob = SocketAddr::from(([192, 168, 1, 11], 1234));

    let response = fixture
        .post_from("/api/wish", json!({"lixi_type": "50k"}), alice)
        .await;
    assert_status!(response, StatusCode::OK);

    let response = fixture
        .post_from("/api/wish", json!({"lixi_type": "50k"}), alice)
        .await;
    assert_status!(response, StatusCode::TOO_MANY_REQUESTS);

    let response = fixture
        .post_from("/api/wish", json!({"lixi_type": "50k"}), bob)
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_burst_admits_exactly_capacity() {
    let fixture = TestFixture::with_config(TestConfig::with_rate_limit(5));

    let requests =
        (0..12).map(|_| fixture.post("/api/wish", json!({"lixi_type": "200k"})));
    let responses = futures::future::join_all(requests).await;

    let ok = responses
        .iter()
        .filter(|r| r.status == StatusCode::OK)
        .count();
    let limited = responses
        .iter()
        .filter(|r| r.status == StatusCode::TOO_MANY_REQUESTS)
        .count();

    assert_eq!(ok, 5);
    assert_eq!(limited, 7);
}

#[tokio::test]
async fn test_rate_limit_rejection_labelled_with_full_path() {
    let fixture = TestFixture::with_config(TestConfig::with_rate_limit(1));
    let peer = SocketAddr::from(([192, 168, 7, 1], 4000));

    fixture
        .post_from("/api/wish", json!({"lixi_type": "100k"}), peer)
        .await;
    let response = fixture
        .post_from("/api/wish", json!({"lixi_type": "100k"}), peer)
        .await;
    assert_status!(response, StatusCode::TOO_MANY_REQUESTS);

    let metrics = fixture.get("/metrics").await;
    assert!(
        metrics
            .text
            .contains("lixi_rate_limit_rejections_total{path=\"/api/wish\"}"),
        "missing /api/wish rejection series:\n{}",
        metrics.text
    );
    assert!(!metrics
        .text
        .contains("lixi_rate_limit_rejections_total{path=\"other\"}"));
}

#[tokio::test]
async fn test_health_not_rate_limited() {
    let fixture = TestFixture::with_config(TestConfig::with_rate_limit(1));

    for _ in 0..5 {
        let response = fixture.get("/api/health").await;
        assert_status!(response, StatusCode::OK);
    }
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_preflight_allowed_origin() {
    let fixture = TestFixture::new();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/wish")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = fixture.send(request).await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
    assert_eq!(fixture.llm.call_count(), 0);
}

#[tokio::test]
async fn test_cors_unknown_origin_not_echoed() {
    let fixture = TestFixture::new();
    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = fixture.send(request).await;

    assert_status!(response, StatusCode::OK);
    assert!(!response
        .headers
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
