//! Wish and fortune endpoints.
//!
//! Both handlers always answer 200: generation failures are absorbed into
//! fallback content by the service. Malformed bodies are rejected by the
//! `Json` extractor before the handler runs.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use lixi_core::{FortuneRequest, FortuneResult, WishRequest, WishResult};

use crate::state::AppState;

pub async fn create_wish(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WishRequest>,
) -> Json<WishResult> {
    debug!(tier = %request.lixi_type, "Wish requested");

    let result = state
        .generation()
        .generate_wish(request.lixi_type, request.user_name.as_deref())
        .await;

    Json(result)
}

pub async fn create_fortune(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FortuneRequest>,
) -> Json<FortuneResult> {
    debug!(mode = %request.mode, "Fortune requested");

    let result = state
        .generation()
        .generate_fortune(request.mode, request.user_name.as_deref())
        .await;

    Json(result)
}
