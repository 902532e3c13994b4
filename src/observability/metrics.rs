//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): requests by outcome
//! - `dispatch_duration_seconds` (histogram): time spent in `serve`
//!
//! Outcomes: `rendered`, `skipped`, `not_found`, `error`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const OUTCOME_ERROR: &str = "error";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one dispatched request.
pub fn record_dispatch(outcome: &'static str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!("dispatch_requests_total", "outcome" => outcome).increment(1);
    histogram!("dispatch_duration_seconds", "outcome" => outcome).record(elapsed);
}
