//! Request descriptor handed to reporters.
//!
//! # Design Decisions
//! - Owned strings; the request itself moves into the inner service
//! - Host header wins over the URI authority; userinfo never reaches `host`
//! - `path` is percent-decoded, `url` is kept as received

use axum::http::{header, Request, Uri};
use percent_encoding::percent_decode_str;

/// Read-only view of an inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// HTTP method (e.g. "GET").
    pub method: String,
    /// Requested host, without scheme.
    pub host: String,
    /// Percent-decoded URL path component.
    pub path: String,
    /// Full request URL as received.
    pub url: String,
}

impl RequestInfo {
    pub fn new(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            host: host.into(),
            path: path.into(),
            url: url.into(),
        }
    }

    /// Capture the reportable parts of an HTTP request.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri_host(uri))
            .unwrap_or_default();

        Self {
            method: request.method().to_string(),
            host,
            path: percent_decode_str(uri.path()).decode_utf8_lossy().into_owned(),
            url: uri.to_string(),
        }
    }
}

/// `host[:port]` from the URI, without userinfo.
fn uri_host(uri: &Uri) -> Option<String> {
    let host = uri.host()?;
    Some(match uri.port_u16() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
