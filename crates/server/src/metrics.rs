use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

use service::ordering::{EntityKind, OrderingError};

// Prometheus metrics (default registry)
pub static REORDER_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hometown_reorder_total",
        "Reorder requests by entity kind and outcome",
        &["kind", "outcome"]
    )
    .expect("register reorder_total")
});

pub static INQUIRIES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "hometown_inquiries_created_total",
        "Contact inquiries stored"
    )
    .expect("register inquiries_created_total")
});

pub static SEARCH_QUERIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "hometown_search_queries_total",
        "Server-side search queries served"
    )
    .expect("register search_queries_total")
});

/// Outcome label of a reorder attempt.
pub fn reorder_outcome(result: Result<(), &OrderingError>) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(OrderingError::AlreadyAtBoundary { .. }) => "boundary",
        Err(OrderingError::NotFound(_)) => "not_found",
        Err(OrderingError::InvalidDirection(_)) => "invalid",
        Err(_) => "error",
    }
}

pub fn record_reorder(kind: EntityKind, result: Result<(), &OrderingError>) {
    REORDER_TOTAL.with_label_values(&[kind.as_str(), reorder_outcome(result)]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

pub async fn metrics_handler() -> (axum::http::StatusCode, String) {
    encode_metrics()
}
