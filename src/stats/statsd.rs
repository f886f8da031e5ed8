//! Counter / gauge / timing reporter.
//!
//! # Metrics
//! - `<ns>.request.method.<METHOD>` (counter): requests started, by method
//! - `<ns>.request.host.<HOST>` (counter): requests started, by host
//! - `<ns>.request.url.<KEY>` (counter + timer): starts and latency per endpoint
//! - `<ns>.requests.active` (gauge): requests in flight
//! - `<ns>.timeout.host.<HOST>` (counter): timeouts, by host
//! - `<ns>.timeout.url.<KEY>` (counter): timeouts per endpoint
//!
//! `<KEY>` is the per-endpoint key from [`endpoint_key`]. These names are what
//! existing dashboards query; keep them stable.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::client::{BackendError, CounterClient};
use super::naming::endpoint_key;
use super::{Reporter, RequestInfo};

/// Default metric namespace.
pub const DEFAULT_NAMESPACE: &str = "templar";

/// Translates lifecycle events into counter-style metrics.
///
/// The client is shared, not owned: whoever built it keeps its connection alive
/// and tears it down.
pub struct StatsdReporter<C: ?Sized> {
    client: Arc<C>,
    namespace: String,
}

impl<C: CounterClient + ?Sized> StatsdReporter<C> {
    /// Reporter under the default `templar` namespace.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_namespace(client, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(client: Arc<C>, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn url_metric(&self, req: &RequestInfo) -> String {
        format!(
            "{}.request.url.{}",
            self.namespace,
            endpoint_key(&req.host, &req.path)
        )
    }

    fn active_metric(&self) -> String {
        format!("{}.requests.active", self.namespace)
    }

    fn incr(&self, name: &str) {
        check(name, self.client.incr(name, 1));
    }

    fn gauge_delta(&self, name: &str, delta: i64) {
        check(name, self.client.gauge_delta(name, delta));
    }
}

/// Log a failed client call; the remaining calls still run.
fn check(metric: &str, result: Result<(), BackendError>) {
    if let Err(e) = result {
        tracing::warn!(metric = %metric, error = %e, "Counter backend call failed");
    }
}

impl<C: ?Sized> fmt::Debug for StatsdReporter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsdReporter")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<C: CounterClient + ?Sized> Reporter for StatsdReporter<C> {
    fn start_request(&self, req: &RequestInfo) {
        self.incr(&format!("{}.request.method.{}", self.namespace, req.method));
        self.incr(&format!("{}.request.host.{}", self.namespace, req.host));
        self.incr(&self.url_metric(req));
        self.gauge_delta(&self.active_metric(), 1);
    }

    fn emit(&self, req: &RequestInfo, elapsed: Duration) {
        self.gauge_delta(&self.active_metric(), -1);
        let name = self.url_metric(req);
        check(&name, self.client.precision_timing(&name, elapsed));
    }

    fn request_timeout(&self, req: &RequestInfo, _timeout: Duration) {
        self.incr(&format!("{}.timeout.host.{}", self.namespace, req.host));
        self.incr(&format!(
            "{}.timeout.url.{}",
            self.namespace,
            endpoint_key(&req.host, &req.path)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testing::{sample_request, CounterCall, RecordingCounterClient};

    #[test]
    fn test_start_request() {
        let client = Arc::new(RecordingCounterClient::new());
        let reporter = StatsdReporter::new(client.clone());

        reporter.start_request(&sample_request());

        assert_eq!(
            client.calls(),
            vec![
                CounterCall::Incr("templar.request.method.GET".into(), 1),
                CounterCall::Incr("templar.request.host.api.example.com".into(), 1),
                CounterCall::Incr("templar.request.url.api.example.com-v1-users".into(), 1),
                CounterCall::GaugeDelta("templar.requests.active".into(), 1),
            ]
        );
    }

    #[test]
    fn test_emit() {
        let client = Arc::new(RecordingCounterClient::new());
        let reporter = StatsdReporter::new(client.clone());

        reporter.emit(&sample_request(), Duration::from_millis(250));

        assert_eq!(
            client.calls(),
            vec![
                CounterCall::GaugeDelta("templar.requests.active".into(), -1),
                CounterCall::Timing(
                    "templar.request.url.api.example.com-v1-users".into(),
                    Duration::from_millis(250)
                ),
            ]
        );
    }

    #[test]
    fn test_request_timeout() {
        let client = Arc::new(RecordingCounterClient::new());
        let reporter = StatsdReporter::new(client.clone());

        reporter.request_timeout(&sample_request(), Duration::from_secs(2));

        assert_eq!(
            client.calls(),
            vec![
                CounterCall::Incr("templar.timeout.host.api.example.com".into(), 1),
                CounterCall::Incr("templar.timeout.url.api.example.com-v1-users".into(), 1),
            ]
        );
    }

    #[test]
    fn test_custom_namespace() {
        let client = Arc::new(RecordingCounterClient::new());
        let reporter = StatsdReporter::with_namespace(client.clone(), "edge");
        let req = RequestInfo::new("PUT", "example.com", "status", "/status");

        reporter.start_request(&req);

        let calls = client.calls();
        assert_eq!(
            calls[0],
            CounterCall::Incr("edge.request.method.PUT".into(), 1)
        );
        assert_eq!(
            calls[2],
            CounterCall::Incr("edge.request.url.example.comstatus".into(), 1)
        );
        assert_eq!(
            calls[3],
            CounterCall::GaugeDelta("edge.requests.active".into(), 1)
        );
    }

    #[test]
    fn test_failures_do_not_stop_remaining_calls() {
        let client = Arc::new(RecordingCounterClient::failing());
        let reporter = StatsdReporter::new(client.clone());
        let req = sample_request();

        reporter.start_request(&req);
        reporter.emit(&req, Duration::from_millis(5));
        reporter.request_timeout(&req, Duration::from_secs(1));

        assert_eq!(client.calls().len(), 4 + 2 + 2);
    }

    #[test]
    fn test_dyn_client() {
        let client: Arc<dyn CounterClient> = Arc::new(RecordingCounterClient::new());
        let reporter = StatsdReporter::new(client);
        assert_eq!(reporter.namespace(), "templar");
        reporter.start_request(&sample_request());
    }
}
