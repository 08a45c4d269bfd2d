//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Generation use-cases (AI vs fallback outcomes, latency)
//! - The upstream LLM (requests, retries, tokens)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Generation Metrics
// =============================================================================

/// Generated results by use-case and content source.
pub static GENERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lixi_generations_total", "Total generated results"),
        &["kind", "source"], // kind: "wish", "fortune"; source: "ai", "fallback"
    )
    .unwrap()
});

/// Failed generation attempts that were replaced by fallback content.
pub static GENERATION_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "lixi_generation_failures_total",
            "Total generation failures by reason",
        ),
        &["kind", "reason"],
    )
    .unwrap()
});

/// End-to-end generation duration in seconds, fallback included.
pub static GENERATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "lixi_generation_duration_seconds",
            "Duration of a generation use-case",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// LLM Metrics
// =============================================================================

/// LLM requests total.
pub static LLM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lixi_llm_requests_total", "Total LLM API requests"),
        &["provider", "outcome"], // outcome: "success" or an error kind
    )
    .unwrap()
});

/// LLM request duration in seconds.
pub static LLM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "lixi_llm_request_duration_seconds",
            "Duration of LLM API requests",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["provider"],
    )
    .unwrap()
});

/// Retries scheduled after a transient failure.
pub static LLM_RETRIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lixi_llm_retries_total", "Total LLM request retries"),
        &["kind"], // "timeout", "rate_limited"
    )
    .unwrap()
});

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lixi_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Generation
        Box::new(GENERATIONS.clone()),
        Box::new(GENERATION_FAILURES.clone()),
        Box::new(GENERATION_DURATION.clone()),
        // LLM
        Box::new(LLM_REQUESTS.clone()),
        Box::new(LLM_REQUEST_DURATION.clone()),
        Box::new(LLM_RETRIES.clone()),
        Box::new(LLM_TOKENS.clone()),
    ]
}
