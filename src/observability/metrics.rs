//! Metrics collection and exposition.
//!
//! # Metrics
//! - `employee_operations_total` (counter): operations by name and outcome
//! - `employee_operation_duration_seconds` (histogram): wrapper latency
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter every call is a no-op
//! - The Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one bounded operation.
pub fn record_operation(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "employee_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "employee_operation_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}
