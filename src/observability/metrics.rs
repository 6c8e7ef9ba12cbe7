//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shout_requests_total` (counter): inbound shout requests by status
//! - `shout_request_duration_seconds` (histogram): end-to-end handler latency
//! - `shout_upstream_requests_total` (counter): upstream calls by outcome
//! - `shout_license_checks_total` (counter): license checks by outcome
//! - `shout_keepalive_pings_total` (counter): keep-alive pings by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16, start: Instant) {
    ::metrics::counter!("shout_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("shout_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(outcome: &'static str) {
    ::metrics::counter!("shout_upstream_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_license_check(outcome: &'static str) {
    ::metrics::counter!("shout_license_checks_total", "outcome" => outcome).increment(1);
}

pub fn record_keepalive(outcome: &'static str) {
    ::metrics::counter!("shout_keepalive_pings_total", "outcome" => outcome).increment(1);
}
