//! Metrics exposition.
//!
//! # Responsibilities
//! - Install the Prometheus recorder behind the `metrics` facade
//! - Serve the scrape endpoint on its own listener
//!
//! Metric names come from `StatsdReporter` (`templar.request.*`,
//! `templar.requests.active`, `templar.timeout.*`); the exporter rewrites the
//! dots to underscores on exposition. Endpoint latency lands in a separate
//! `templar_request_url_<KEY>_seconds` family next to the endpoint counter.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}
