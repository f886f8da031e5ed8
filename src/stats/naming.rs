//! Metric name helpers.
//!
//! Dots are hierarchy separators in counter-style namespaces, so URL paths are
//! flattened into a single token before they become part of a metric name.

/// Replace every `/` in a path with `-`.
pub fn sanitize_path(path: &str) -> String {
    path.replace('/', "-")
}

/// Per-endpoint key: host followed by the sanitized path.
pub fn endpoint_key(host: &str, path: &str) -> String {
    let mut key = String::with_capacity(host.len() + path.len());
    key.push_str(host);
    key.push_str(&sanitize_path(path));
    key
}
