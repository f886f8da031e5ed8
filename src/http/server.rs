//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (tracing, lifecycle reporting)
//! - Bind server to listener
//! - Forward requests to the upstream

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::TemplarConfig;
use crate::http::middleware::{stats_middleware, StatsState};
use crate::stats::Reporter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// Wrap `router` so every request is reported to `reporter`.
///
/// Requests running longer than `timeout` are answered with 504 and reported
/// through `request_timeout`.
pub fn instrument(router: Router, reporter: Arc<dyn Reporter>, timeout: Duration) -> Router {
    router.layer(middleware::from_fn_with_state(
        StatsState::new(reporter, timeout),
        stats_middleware,
    ))
}

/// HTTP front end for templar.
pub struct HttpServer {
    router: Router,
    config: TemplarConfig,
}

impl HttpServer {
    /// Create a new HTTP server reporting to `reporter`.
    ///
    /// Fails if the configured upstream address is not a valid authority.
    pub fn new(
        config: TemplarConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, axum::http::uri::InvalidUri> {
        let upstream = Authority::from_str(&config.upstream.address)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_millis(config.timeouts.connect_ms)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState { client, upstream };
        let router = Self::build_router(&config, state, reporter);
        Ok(Self { router, config })
    }

    fn build_router(
        config: &TemplarConfig,
        state: AppState,
        reporter: Arc<dyn Reporter>,
    ) -> Router {
        let router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state);

        instrument(
            router,
            reporter,
            Duration::from_millis(config.timeouts.request_ms),
        )
        .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TemplarConfig {
        &self.config
    }
}

/// Forward the request to the upstream, keeping method, path, query and headers.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
