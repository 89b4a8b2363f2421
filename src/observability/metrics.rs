//! Metrics collection and exposition.
//!
//! # Metrics
//! - `task_api_requests_total` (counter): requests by method, status, action
//! - `task_api_request_duration_seconds` (histogram): latency distribution

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
///
/// Failure to install is logged, not fatal: the service still runs, metric
/// updates just become no-ops.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, action: &str, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("action", action.to_string()),
    ];
    metrics::counter!("task_api_requests_total", &labels).increment(1);
    metrics::histogram!("task_api_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
