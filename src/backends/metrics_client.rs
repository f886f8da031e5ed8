//! `CounterClient` on top of the `metrics` facade.
//!
//! Whatever recorder is installed (the Prometheus exporter in the binary)
//! receives the samples. With no recorder installed every call is a no-op.
//!
//! Statsd keeps counters and timers apart even under one name; Prometheus does
//! not, so timings go to a `<name>.seconds` histogram family.

use std::time::Duration;

use crate::stats::{BackendError, CounterClient};

/// Suffix appended to timing names to keep them out of the counter family.
pub const TIMING_SUFFIX: &str = ".seconds";

/// Counter-style client backed by the global `metrics` recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsClient;

impl MetricsClient {
    pub fn new() -> Self {
        Self
    }
}

impl CounterClient for MetricsClient {
    fn incr(&self, name: &str, amount: i64) -> Result<(), BackendError> {
        let amount = u64::try_from(amount).map_err(|_| {
            BackendError::Rejected(format!("counter {} cannot decrease by {}", name, amount))
        })?;
        metrics::counter!(name.to_string()).increment(amount);
        Ok(())
    }

    fn gauge_delta(&self, name: &str, delta: i64) -> Result<(), BackendError> {
        let gauge = metrics::gauge!(name.to_string());
        if delta >= 0 {
            gauge.increment(delta as f64);
        } else {
            gauge.decrement(delta.unsigned_abs() as f64);
        }
        Ok(())
    }

    /// Timings are recorded as histogram samples in seconds under
    /// `<name>.seconds`.
    fn precision_timing(&self, name: &str, duration: Duration) -> Result<(), BackendError> {
        let name = format!("{}{}", name, TIMING_SUFFIX);
        metrics::histogram!(name).record(duration.as_secs_f64());
        Ok(())
    }
}
