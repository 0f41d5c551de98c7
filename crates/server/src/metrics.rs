use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "album_store_requests_total",
        "Album store operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register album_store_requests_total")
});

pub static ALBUMS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("album_store_albums", "Albums currently held in memory")
        .expect("register album_store_albums")
});

pub fn record(op: &str, outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn set_album_count(n: usize) {
    ALBUMS.set(i64::try_from(n).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
