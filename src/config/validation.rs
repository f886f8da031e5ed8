//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0)
//! - Reject metric namespaces that would break metric names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TemplarConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TemplarConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("stats.namespace: {0}")]
    InvalidNamespace(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TemplarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        &mut errors,
        "listener.bind_address",
        &config.listener.bind_address,
    );
    check_address(&mut errors, "upstream.address", &config.upstream.address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_ms",
        });
    }
    if config.timeouts.connect_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.connect_ms",
        });
    }

    let ns = &config.stats.namespace;
    if ns.is_empty() {
        errors.push(ValidationError::InvalidNamespace("must not be empty".into()));
    } else if ns.contains('/') || ns.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidNamespace(format!(
            "{:?} contains '/' or whitespace",
            ns
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
