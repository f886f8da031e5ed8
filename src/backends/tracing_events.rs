//! `EventClient` that logs each event through `tracing`.

use crate::stats::{BackendError, Event, EventClient};

/// Emits structured events as log records under the `templar::events` target.
///
/// Events whose state is not `ok` are logged at `warn`, the rest at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventClient;

impl TracingEventClient {
    pub fn new() -> Self {
        Self
    }
}

impl EventClient for TracingEventClient {
    fn send(&self, event: &Event) -> Result<(), BackendError> {
        let attributes = serde_json::to_string(&event.attributes)
            .map_err(|e| BackendError::Encode(e.to_string()))?;

        if event.state == "ok" {
            tracing::info!(
                target: "templar::events",
                state = %event.state,
                service = %event.service,
                metric = event.metric,
                attributes = %attributes,
                "event"
            );
        } else {
            tracing::warn!(
                target: "templar::events",
                state = %event.state,
                service = %event.service,
                metric = event.metric,
                attributes = %attributes,
                "event"
            );
        }
        Ok(())
    }
}
