//! Human-readable reporter for local development.
//!
//! One line per event:
//! ```text
//! [2026-10-16T09:12:44.123456789Z] S GET http://api.example.com/v1/users
//! [2026-10-16T09:12:44.373456789Z] E GET http://api.example.com/v1/users (250ms)
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use super::{Reporter, RequestInfo};

/// Writes one line per lifecycle event to a sink (stdout by default).
///
/// Write failures are swallowed.
pub struct DebugReporter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DebugReporter {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn write(&self, kind: char, req: &RequestInfo, duration: Option<Duration>) {
        let line = format_line(&timestamp(), kind, req, duration);
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::debug!(error = %e, "Debug reporter write failed");
        }
    }
}

impl Default for DebugReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for DebugReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugReporter").finish_non_exhaustive()
    }
}

impl Reporter for DebugReporter {
    fn start_request(&self, req: &RequestInfo) {
        self.write('S', req, None);
    }

    fn emit(&self, req: &RequestInfo, elapsed: Duration) {
        self.write('E', req, Some(elapsed));
    }

    fn request_timeout(&self, req: &RequestInfo, timeout: Duration) {
        self.write('T', req, Some(timeout));
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn format_line(ts: &str, kind: char, req: &RequestInfo, duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("[{}] {} {} {} ({:?})", ts, kind, req.method, req.url, d),
        None => format!("[{}] {} {} {}", ts, kind, req.method, req.url),
    }
}
