//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Generation calls (requests, latency, tokens)
//! - Pipelines (field fallbacks, search result counts)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Generation Metrics
// =============================================================================

/// Generation requests total by pipeline and outcome.
pub static GENERATION_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "airsight_generation_requests_total",
            "Total grounded generation requests",
        ),
        &["pipeline", "status"], // pipeline: "search", "aqi"; status: "success", "failure"
    )
    .unwrap()
});

/// Generation request duration in seconds.
pub static GENERATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "airsight_generation_duration_seconds",
            "Duration of grounded generation requests",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]),
        &["pipeline"],
    )
    .unwrap()
});

/// Generation tokens used.
pub static GENERATION_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "airsight_generation_tokens_total",
            "Total generation tokens used",
        ),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Pipeline Metrics
// =============================================================================

/// Fields that fell back to a default because the response omitted them.
pub static FIELD_FALLBACKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "airsight_field_fallbacks_total",
            "Total extracted fields replaced by a fallback value",
        ),
        &["field"],
    )
    .unwrap()
});

/// Accepted candidates per location search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "airsight_search_results",
            "Number of location candidates accepted per search",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(GENERATION_REQUESTS.clone()),
        Box::new(GENERATION_DURATION.clone()),
        Box::new(GENERATION_TOKENS.clone()),
        Box::new(FIELD_FALLBACKS.clone()),
        Box::new(SEARCH_RESULTS.clone()),
    ]
}
