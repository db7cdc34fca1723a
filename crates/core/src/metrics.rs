//! Metrics definitions for the storefront.
//!
//! This module defines all metrics used throughout the storefront service.
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "catalog_queries_total",
        "Total number of catalog queries issued to the Storefront API"
    );
    describe_histogram!(
        "catalog_query_duration_seconds",
        "Time taken by one catalog query in seconds"
    );
    describe_counter!(
        "cart_submissions_total",
        "Total number of cart lines-add submissions"
    );
    describe_counter!(
        "deferred_failures_total",
        "Total number of neutralized deferred data failures"
    );
}

/// Record a catalog query.
///
/// # Arguments
/// * `outcome` - "ok" or "error"
pub fn record_catalog_query(outcome: &str) {
    counter!("catalog_queries_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record catalog query duration.
pub fn record_catalog_query_duration(duration_secs: f64) {
    histogram!("catalog_query_duration_seconds").record(duration_secs);
}

/// Record a cart submission.
///
/// # Arguments
/// * `outcome` - "ok" or "error"
pub fn record_cart_submission(outcome: &str) {
    counter!("cart_submissions_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a deferred data failure that was neutralized.
pub fn record_deferred_failure() {
    counter!("deferred_failures_total").increment(1);
}
