//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that outbound endpoints are usable http(s) URLs
//! - Validate value ranges (intervals > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::new(
            "listener.max_body_size",
            "must be greater than zero",
        ));
    }

    if let Err(msg) = check_http_url(&config.upstream.url) {
        errors.push(ValidationError::new("upstream.url", msg));
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            "must be greater than zero when set",
        ));
    }

    if config.license.enabled {
        if let Err(msg) = check_http_url(&config.license.verify_url) {
            errors.push(ValidationError::new("license.verify_url", msg));
        }
        if config.license.product_permalink.trim().is_empty() {
            errors.push(ValidationError::new(
                "license.product_permalink",
                "must not be empty",
            ));
        }
        if HeaderName::from_bytes(config.license.header.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                "license.header",
                format!("{:?} is not a valid header name", config.license.header),
            ));
        }
    }

    if config.keepalive.enabled && config.keepalive.interval_secs == 0 {
        errors.push(ValidationError::new(
            "keepalive.interval_secs",
            "must be greater than zero",
        ));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("expected \"pretty\" or \"json\", got {:?}", other),
        )),
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("{:?} is not a valid URL: {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("unsupported scheme {:?}", scheme)),
    }
}
