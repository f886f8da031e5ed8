//! Lifecycle reporting middleware.
//!
//! # Responsibilities
//! - Report `start_request` before the inner service runs
//! - Enforce the request timeout
//! - Report exactly one of `emit` (with latency) or `request_timeout`
//!
//! # Design Decisions
//! - Owns the request timeout; no separate `TimeoutLayer`
//! - Timed out requests get a 504; the inner future is dropped

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::stats::{Reporter, RequestInfo};

/// State for [`stats_middleware`].
#[derive(Debug, Clone)]
pub struct StatsState {
    pub reporter: Arc<dyn Reporter>,
    pub timeout: Duration,
}

impl StatsState {
    pub fn new(reporter: Arc<dyn Reporter>, timeout: Duration) -> Self {
        Self { reporter, timeout }
    }
}

/// Middleware function reporting request lifecycle events.
pub async fn stats_middleware(
    State(state): State<StatsState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let info = RequestInfo::from_request(&request);
    state.reporter.start_request(&info);
    let start = Instant::now();

    match tokio::time::timeout(state.timeout, next.run(request)).await {
        Ok(response) => {
            state.reporter.emit(&info, start.elapsed());
            response
        }
        Err(_) => {
            tracing::warn!(
                method = %info.method,
                host = %info.host,
                path = %info.path,
                timeout = ?state.timeout,
                "Request timed out"
            );
            state.reporter.request_timeout(&info, state.timeout);
            (StatusCode::GATEWAY_TIMEOUT, "Request timed out").into_response()
        }
    }
}
