//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

use templar::stats::{Reporter, RequestInfo};

/// One reported lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Start(RequestInfo),
    Emit(RequestInfo, Duration),
    Timeout(RequestInfo, Duration),
}

/// Reporter that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn start_request(&self, req: &RequestInfo) {
        self.events.lock().unwrap().push(Recorded::Start(req.clone()));
    }

    fn emit(&self, req: &RequestInfo, elapsed: Duration) {
        self.events.lock().unwrap().push(Recorded::Emit(req.clone(), elapsed));
    }

    fn request_timeout(&self, req: &RequestInfo, timeout: Duration) {
        self.events.lock().unwrap().push(Recorded::Timeout(req.clone(), timeout));
    }
}

/// Start a mock upstream on an ephemeral port.
///
/// `/slow` sleeps before answering; everything else echoes the path.
#[allow(dead_code)]
pub async fn start_mock_upstream(delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route(
            "/slow",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "slow"
            }),
        )
        .fallback(|uri: axum::http::Uri| async move { format!("upstream {}", uri.path()) });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
