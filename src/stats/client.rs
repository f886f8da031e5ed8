//! Capability contracts for metrics backends.
//!
//! Reporters depend on these traits only, never on a concrete wire client.
//! Implementations must be safe for concurrent use: reporters share one client
//! across every in-flight request and add no locking of their own.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Failure reported by a backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encode(String),

    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Counter / gauge / timing style backend (statsd and friends).
pub trait CounterClient: Send + Sync {
    /// Increment a named counter.
    fn incr(&self, name: &str, amount: i64) -> Result<(), BackendError>;

    /// Adjust a named gauge by a signed delta.
    fn gauge_delta(&self, name: &str, delta: i64) -> Result<(), BackendError>;

    /// Record a timing sample.
    fn precision_timing(&self, name: &str, duration: Duration) -> Result<(), BackendError>;
}

/// Structured event backend (riemann and friends).
pub trait EventClient: Send + Sync {
    fn send(&self, event: &Event) -> Result<(), BackendError>;
}

/// A single structured event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Free-text severity ("ok", "warning", ...).
    pub state: String,
    /// Event category.
    pub service: String,
    pub metric: f64,
    pub attributes: BTreeMap<String, String>,
}
