//! Recording doubles shared by the reporter tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::client::{BackendError, CounterClient, Event, EventClient};
use super::{Reporter, RequestInfo};

pub fn sample_request() -> RequestInfo {
    RequestInfo::new(
        "GET",
        "api.example.com",
        "/v1/users",
        "http://api.example.com/v1/users",
    )
}

/// One call made against a `CounterClient`.
#[derive(Debug, Clone, PartialEq)]
pub enum CounterCall {
    Incr(String, i64),
    GaugeDelta(String, i64),
    Timing(String, Duration),
}

#[derive(Debug, Default)]
pub struct RecordingCounterClient {
    calls: Mutex<Vec<CounterCall>>,
    fail: bool,
}

impl RecordingCounterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every call, then reports it as failed.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<CounterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CounterCall) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(BackendError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl CounterClient for RecordingCounterClient {
    fn incr(&self, name: &str, amount: i64) -> Result<(), BackendError> {
        self.record(CounterCall::Incr(name.to_string(), amount))
    }

    fn gauge_delta(&self, name: &str, delta: i64) -> Result<(), BackendError> {
        self.record(CounterCall::GaugeDelta(name.to_string(), delta))
    }

    fn precision_timing(&self, name: &str, duration: Duration) -> Result<(), BackendError> {
        self.record(CounterCall::Timing(name.to_string(), duration))
    }
}

#[derive(Debug, Default)]
pub struct RecordingEventClient {
    events: Mutex<Vec<Event>>,
    fail: bool,
}

impl RecordingEventClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventClient for RecordingEventClient {
    fn send(&self, event: &Event) -> Result<(), BackendError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            Err(BackendError::Encode("bad payload".into()))
        } else {
            Ok(())
        }
    }
}

/// Reporter that appends `"<tag>:<op>"` to a shared log.
#[derive(Debug)]
pub struct RecordingReporter {
    tag: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn new(tag: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { tag, log }
    }

    fn push(&self, op: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", self.tag, op));
    }
}

impl Reporter for RecordingReporter {
    fn start_request(&self, _req: &RequestInfo) {
        self.push("start");
    }

    fn emit(&self, _req: &RequestInfo, _elapsed: Duration) {
        self.push("emit");
    }

    fn request_timeout(&self, _req: &RequestInfo, _timeout: Duration) {
        self.push("timeout");
    }
}

/// Reporter that panics on every call.
#[derive(Debug)]
pub struct PanickingReporter;

impl Reporter for PanickingReporter {
    fn start_request(&self, _req: &RequestInfo) {
        panic!("start_request blew up");
    }

    fn emit(&self, _req: &RequestInfo, _elapsed: Duration) {
        panic!("emit blew up");
    }

    fn request_timeout(&self, _req: &RequestInfo, _timeout: Duration) {
        panic!("request_timeout blew up");
    }
}
