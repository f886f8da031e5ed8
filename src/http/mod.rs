//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → middleware/stats.rs (start / emit / timeout reporting)
//!     → server.rs proxy handler (forward to upstream)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{stats_middleware, StatsState};
pub use server::{instrument, HttpServer};
