use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::middleware::{metrics_middleware, rate_limit_middleware};
use super::{generation, handlers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config().server.cors_origins);

    // Generation routes share the per-client rate limit
    let generation_routes = Router::new()
        .route("/wish", post(generation::create_wish))
        .route("/fortune", post(generation::create_fortune))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            rate_limit_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .merge(generation_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Build the CORS layer from the configured origins.
///
/// Origins are validated at startup; any that still fail to parse are
/// skipped with a warning.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
