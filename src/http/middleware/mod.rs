//! Axum middleware.

pub mod stats;

pub use stats::{stats_middleware, StatsState};
