//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the lixi server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Rate limiter rejections and tracked clients
//! - Core generation and LLM metrics (registered from `lixi_core`)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "lixi_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lixi_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "lixi_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Rate Limit Metrics
// =============================================================================

/// Requests rejected by the per-client rate limiter.
pub static RATE_LIMIT_REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "lixi_rate_limit_rejections_total",
            "Total requests rejected by the rate limiter",
        ),
        &["path"],
    )
    .unwrap()
});

/// Clients with a live token bucket (collected dynamically).
pub static RATE_LIMIT_TRACKED_CLIENTS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "lixi_rate_limit_tracked_clients",
        "Number of clients currently tracked by the rate limiter",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Rate limiting
    registry
        .register(Box::new(RATE_LIMIT_REJECTIONS.clone()))
        .unwrap();
    registry
        .register(Box::new(RATE_LIMIT_TRACKED_CLIENTS.clone()))
        .unwrap();

    // Core metrics (generation, LLM)
    for metric in lixi_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let tracked = state.rate_limiter().tracked_clients().await;
    RATE_LIMIT_TRACKED_CLIENTS.set(tracked as i64);
}

/// Map a request path to a metric label.
///
/// Known routes keep their path; anything else collapses into one label so
/// scanners cannot blow up label cardinality.
pub fn normalize_path(path: &str) -> &'static str {
    match path {
        "/api/health" => "/api/health",
        "/api/wish" => "/api/wish",
        "/api/fortune" => "/api/fortune",
        "/metrics" => "/metrics",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_known_routes() {
        assert_eq!(normalize_path("/api/wish"), "/api/wish");
        assert_eq!(normalize_path("/api/fortune"), "/api/fortune");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }

    #[test]
    fn test_normalize_path_unknown() {
        assert_eq!(normalize_path("/wp-admin/install.php"), "other");
        assert_eq!(normalize_path("/api/wish/extra"), "other");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        // Access metrics to ensure they're initialized
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/api/health", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("lixi_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_all_metrics() {
        // Touch all metrics to ensure they appear in output
        // (Prometheus only outputs metrics that have been accessed)
        HTTP_REQUEST_DURATION
            .with_label_values(&["POST", "/api/wish", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        RATE_LIMIT_REJECTIONS.with_label_values(&["/api/wish"]).inc();
        RATE_LIMIT_TRACKED_CLIENTS.set(0);
        lixi_core::metrics::GENERATIONS
            .with_label_values(&["wish", "fallback"])
            .inc();

        let output = encode_metrics();

        assert!(output.contains("lixi_http_request_duration_seconds"));
        assert!(output.contains("lixi_http_requests_in_flight"));
        assert!(output.contains("lixi_rate_limit_rejections_total"));
        assert!(output.contains("lixi_rate_limit_tracked_clients"));
        assert!(output.contains("lixi_generations_total"));
    }
}
