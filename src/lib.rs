//! Templar: HTTP request lifecycle reporting.
//!
//! A request handler holds one [`stats::Reporter`] (usually a
//! [`stats::MultiReporter`]) and calls it when a request starts, completes or
//! times out. Each reporter translates those events for its backend.

pub mod backends;
pub mod config;
pub mod http;
pub mod observability;
pub mod stats;

pub use config::schema::TemplarConfig;
pub use http::HttpServer;
pub use stats::{MultiReporter, Reporter, RequestInfo};
