//! Request lifecycle reporting.
//!
//! # Data Flow
//! ```text
//! request handler
//!     → Reporter (one handle, usually a MultiReporter)
//!         → DebugReporter   (stdout lines)
//!         → StatsdReporter  (counters, gauges, timers via CounterClient)
//!         → RiemannReporter (structured events via EventClient)
//! ```
//!
//! # Design Decisions
//! - Three lifecycle points: start, completion (`emit`) and timeout
//! - Reporting never fails the request: backend errors are logged and dropped
//! - Reporters are built once at startup and never mutated
//! - No buffering, sampling or retries; every call is synchronous

pub mod client;
pub mod debug;
pub mod multi;
pub mod naming;
pub mod request;
pub mod riemann;
pub mod statsd;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

pub use client::{BackendError, CounterClient, Event, EventClient};
pub use debug::DebugReporter;
pub use multi::MultiReporter;
pub use naming::{endpoint_key, sanitize_path};
pub use request::RequestInfo;
pub use riemann::RiemannReporter;
pub use statsd::StatsdReporter;

use crate::backends::{MetricsClient, TracingEventClient};
use crate::config::StatsConfig;

/// Receives request lifecycle events.
///
/// For a given request the caller invokes `start_request` once, then exactly
/// one of `emit` or `request_timeout`. Implementations may be called from many
/// requests concurrently.
pub trait Reporter: Send + Sync + Debug {
    /// Processing of `req` has begun.
    fn start_request(&self, req: &RequestInfo);

    /// Processing of `req` finished after `elapsed`, successfully or not.
    fn emit(&self, req: &RequestInfo, elapsed: Duration);

    /// `req` exceeded `timeout` without completing.
    fn request_timeout(&self, req: &RequestInfo, timeout: Duration);
}

/// Build the configured reporter set.
///
/// Order is debug, statsd, riemann. With nothing enabled the result is an
/// empty (no-op) composite.
pub fn build_reporter(config: &StatsConfig) -> MultiReporter {
    let mut reporters: Vec<Arc<dyn Reporter>> = Vec::new();

    if config.debug {
        reporters.push(Arc::new(DebugReporter::stdout()));
    }

    if config.statsd {
        let client = Arc::new(MetricsClient::new());
        reporters.push(Arc::new(StatsdReporter::with_namespace(
            client,
            config.namespace.clone(),
        )));
    }

    if config.riemann {
        let client = Arc::new(TracingEventClient::new());
        reporters.push(Arc::new(RiemannReporter::new(client)));
    }

    tracing::info!(
        reporters = reporters.len(),
        debug = config.debug,
        statsd = config.statsd,
        riemann = config.riemann,
        namespace = %config.namespace,
        "Stats reporters configured"
    );

    MultiReporter::new(reporters)
}
