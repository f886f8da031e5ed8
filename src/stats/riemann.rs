//! Structured-event reporter.
//!
//! Every lifecycle event becomes one event carrying `method`, `host` and
//! `path` attributes. Latency and timeout metrics are in milliseconds.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::client::{Event, EventClient};
use super::{Reporter, RequestInfo};

pub const SERVICE_REQUEST: &str = "templar request";
pub const SERVICE_RESPONSE: &str = "templar response";
pub const SERVICE_TIMEOUT: &str = "templar timeout";

const STATE_OK: &str = "ok";
const STATE_WARNING: &str = "warning";

/// Translates lifecycle events into structured events.
///
/// The client is shared with the caller, who owns its connection lifecycle.
pub struct RiemannReporter<C: ?Sized> {
    client: Arc<C>,
}

impl<C: EventClient + ?Sized> RiemannReporter<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    fn send(&self, req: &RequestInfo, state: &str, service: &str, metric: f64) {
        let event = Event {
            state: state.to_string(),
            service: service.to_string(),
            metric,
            attributes: attributes(req),
        };
        if let Err(e) = self.client.send(&event) {
            tracing::warn!(service = %service, error = %e, "Event backend send failed");
        }
    }
}

fn attributes(req: &RequestInfo) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("method".to_string(), req.method.clone()),
        ("host".to_string(), req.host.clone()),
        ("path".to_string(), req.path.clone()),
    ])
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

impl<C: ?Sized> fmt::Debug for RiemannReporter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiemannReporter").finish_non_exhaustive()
    }
}

impl<C: EventClient + ?Sized> Reporter for RiemannReporter<C> {
    fn start_request(&self, req: &RequestInfo) {
        self.send(req, STATE_OK, SERVICE_REQUEST, 1.0);
    }

    fn emit(&self, req: &RequestInfo, elapsed: Duration) {
        self.send(req, STATE_OK, SERVICE_RESPONSE, millis(elapsed));
    }

    fn request_timeout(&self, req: &RequestInfo, timeout: Duration) {
        self.send(req, STATE_WARNING, SERVICE_TIMEOUT, millis(timeout));
    }
}
