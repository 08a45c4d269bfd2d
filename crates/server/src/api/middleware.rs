//! Rate limiting and metrics middleware for API routes.

use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use lixi_core::RateLimitError;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
    RATE_LIMIT_REJECTIONS,
};
use crate::state::AppState;

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let response = next.run(request).await;

    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, path, &status])
        .inc();

    response
}

/// Body of a 429 response.
#[derive(Debug, Serialize)]
pub struct RateLimitedResponse {
    pub error: String,
    pub retry_after_ms: u64,
}

/// Per-client rate limiting keyed by the peer address.
///
/// Rejected requests never reach the handler and get a 429 with a
/// `Retry-After` header in whole seconds.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_ip(&request);

    match state.rate_limiter().try_acquire(client).await {
        Ok(()) => next.run(request).await,
        Err(RateLimitError::Exceeded { retry_after_ms }) => {
            // Nested routers see the path with the `/api` prefix stripped
            let uri = request
                .extensions()
                .get::<OriginalUri>()
                .map_or(request.uri(), |OriginalUri(uri)| uri);
            let path = normalize_path(uri.path());
            RATE_LIMIT_REJECTIONS.with_label_values(&[path]).inc();
            warn!(client = %client, path, retry_after_ms, "Rate limit exceeded");

            let retry_after_secs = retry_after_ms.div_ceil(1000).max(1);
            let body = RateLimitedResponse {
                error: format!(
                    "Rate limit exceeded: {} per 1 minute",
                    state.rate_limiter().requests_per_minute()
                ),
                retry_after_ms,
            };

            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(body),
            )
                .into_response()
        }
    }
}

/// Source IP of the request (default to localhost if not available).
fn client_ip(request: &Request<Body>) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
