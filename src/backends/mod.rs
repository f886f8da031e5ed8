//! In-process backend clients.
//!
//! # Responsibilities
//! - Bridge `CounterClient` onto the `metrics` facade (scraped via Prometheus)
//! - Bridge `EventClient` onto structured `tracing` events
//!
//! # Design Decisions
//! - No network code here: dedicated statsd/riemann wire clients plug in by
//!   implementing the same traits
//! - Both clients are stateless and safe to share across requests

pub mod metrics_client;
pub mod tracing_events;

pub use metrics_client::MetricsClient;
pub use tracing_events::TracingEventClient;
