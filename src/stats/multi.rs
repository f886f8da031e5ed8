//! Fan-out reporter.
//!
//! # Design Decisions
//! - Member list is fixed at construction; no lock is taken per call
//! - Members run in construction order, every member on every call
//! - A panicking member is logged and skipped so the rest still report

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use super::{Reporter, RequestInfo};

/// Broadcasts every lifecycle event to an ordered list of reporters.
#[derive(Debug, Clone, Default)]
pub struct MultiReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl MultiReporter {
    pub fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    fn each(&self, op: &'static str, f: impl Fn(&dyn Reporter)) {
        for (index, reporter) in self.reporters.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| f(reporter.as_ref())));
            if result.is_err() {
                tracing::error!(
                    reporter = index,
                    operation = op,
                    "Reporter panicked, continuing with remaining reporters"
                );
            }
        }
    }
}

impl FromIterator<Arc<dyn Reporter>> for MultiReporter {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Reporter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Reporter for MultiReporter {
    fn start_request(&self, req: &RequestInfo) {
        self.each("start_request", |r| r.start_request(req));
    }

    fn emit(&self, req: &RequestInfo, elapsed: Duration) {
        self.each("emit", |r| r.emit(req, elapsed));
    }

    fn request_timeout(&self, req: &RequestInfo, timeout: Duration) {
        self.each("request_timeout", |r| r.request_timeout(req, timeout));
    }
}
